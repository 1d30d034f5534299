pub mod opencv_device;
