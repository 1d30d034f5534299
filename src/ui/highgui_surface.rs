use crate::core::frame::Frame;
use crate::core::surface::{Command, Surface, SurfaceEvent};
use crate::errors::AppError;
use crate::ui::layout::{ButtonBar, Region};
use log::debug;
use opencv::core::{Mat, Point, Rect, Scalar, CV_8UC3};
use opencv::prelude::*;
use opencv::{highgui, imgproc};
use std::sync::{Arc, Mutex};

const KEY_ESC: i32 = 27;
const KEY_QUIT: i32 = b'q' as i32;

// control colors, BGR order
const RED: (f64, f64, f64) = (60.0, 20.0, 220.0);
const GREEN: (f64, f64, f64) = (34.0, 139.0, 34.0);
const BLUE: (f64, f64, f64) = (255.0, 144.0, 30.0);
const PURPLE: (f64, f64, f64) = (128.0, 0.0, 128.0);
const GRAY: (f64, f64, f64) = (50.0, 50.0, 50.0);
const WHITE: (f64, f64, f64) = (255.0, 255.0, 255.0);

fn scalar((b, g, r): (f64, f64, f64)) -> Scalar {
    Scalar::new(b, g, r, 0.0)
}

fn sur<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Surface(e.to_string())
}

/// OpenCV window presenting the live feed plus the control strip. Mouse
/// clicks land in a queue filled by the highgui callback and are hit-tested
/// against the button layout when the loop polls.
pub struct HighguiSurface {
    window_name: String,
    clicks: Arc<Mutex<Vec<(i32, i32)>>>,
    layout: Option<ButtonBar>,
}

impl HighguiSurface {
    pub fn new(window_name: &str) -> Result<Self, AppError> {
        highgui::named_window(window_name, highgui::WINDOW_AUTOSIZE).map_err(sur)?;

        let clicks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicks);
        highgui::set_mouse_callback(
            window_name,
            Some(Box::new(move |event, x, y, _flags| {
                if event == highgui::EVENT_LBUTTONDOWN {
                    if let Ok(mut queue) = sink.lock() {
                        queue.push((x, y));
                    }
                }
            })),
        )
        .map_err(sur)?;

        Ok(HighguiSurface {
            window_name: window_name.to_string(),
            clicks,
            layout: None,
        })
    }

    fn layout_for(&mut self, frame: &Frame) -> ButtonBar {
        let (width, video_height) = (frame.width() as i32, frame.height() as i32);
        match self.layout {
            Some(bar) if bar.width() == width && bar.video_height() == video_height => bar,
            _ => {
                let bar = ButtonBar::new(width, video_height);
                self.layout = Some(bar);
                bar
            }
        }
    }

    fn draw_button(
        canvas: &mut Mat,
        region: Region,
        label: &str,
        fill: (f64, f64, f64),
    ) -> Result<(), AppError> {
        let rect = Rect::new(region.x, region.y, region.width, region.height);
        imgproc::rectangle(canvas, rect, scalar(fill), imgproc::FILLED, imgproc::LINE_8, 0).map_err(sur)?;

        let mut baseline = 0;
        let text_size =
            imgproc::get_text_size(label, imgproc::FONT_HERSHEY_SIMPLEX, 0.8, 2, &mut baseline).map_err(sur)?;
        let origin = Point::new(
            region.x + (region.width - text_size.width) / 2,
            region.y + (region.height + text_size.height) / 2,
        );
        imgproc::put_text(
            canvas,
            label,
            origin,
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.8,
            scalar(WHITE),
            2,
            imgproc::LINE_AA,
            false,
        )
        .map_err(sur)
    }
}

impl Surface for HighguiSurface {
    fn present(&mut self, frame: &Frame, recording: bool) -> Result<(), AppError> {
        let bar = self.layout_for(frame);

        let mut canvas = Mat::new_rows_cols_with_default(
            bar.canvas_height(),
            bar.width(),
            CV_8UC3,
            Scalar::all(0.0),
        )
        .map_err(sur)?;

        let bgr = frame.to_bgr8();
        let flat = Mat::from_slice(&bgr).map_err(sur)?;
        let video = flat.reshape(3, bar.video_height()).map_err(sur)?;
        {
            let mut video_area =
                Mat::roi_mut(&mut canvas, Rect::new(0, 0, bar.width(), bar.video_height()))
                    .map_err(sur)?;
            video.copy_to(&mut video_area).map_err(sur)?;
        }

        imgproc::line(
            &mut canvas,
            Point::new(0, bar.video_height()),
            Point::new(bar.width(), bar.video_height()),
            scalar(GRAY),
            2,
            imgproc::LINE_8,
            0,
        )
        .map_err(sur)?;

        for (command, region) in bar.buttons() {
            let (label, fill) = match command {
                Command::ToggleRecord if recording => ("Stop", GREEN),
                Command::ToggleRecord => ("Record", RED),
                Command::Snapshot => ("Snap", BLUE),
                Command::Merge => ("Merge", PURPLE),
            };
            Self::draw_button(&mut canvas, region, label, fill)?;
        }

        highgui::imshow(&self.window_name, &canvas).map_err(sur)
    }

    fn poll_events(&mut self) -> Result<Vec<SurfaceEvent>, AppError> {
        let mut events = Vec::new();

        let key = highgui::wait_key(1).map_err(sur)?;
        if key == KEY_ESC || key == KEY_QUIT {
            events.push(SurfaceEvent::Quit);
        }
        if highgui::get_window_property(&self.window_name, highgui::WND_PROP_VISIBLE).map_err(sur)? < 1.0 {
            events.push(SurfaceEvent::Quit);
        }

        let pending: Vec<(i32, i32)> = match self.clicks.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => Vec::new(),
        };
        if let Some(bar) = &self.layout {
            for (x, y) in pending {
                match bar.command_at(x, y) {
                    Some(command) => events.push(SurfaceEvent::Command(command)),
                    None => debug!("Click at ({}, {}) hit no control", x, y),
                }
            }
        }

        Ok(events)
    }
}

impl Drop for HighguiSurface {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.window_name);
    }
}
