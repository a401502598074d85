//! GTK4 demo host that runs on the **main thread**.
//!
//! # Widget tree
//!
//! ```text
//! window
//! └ .switch-list            (vertical box)
//!     ├ .switch-row         (one per configured switch)
//!     │   ├ .switch-label   (variant name)
//!     │   └ .switch         (DrawingArea, painted with cairo)
//!     └ …
//! ```
//!
//! # CSS selectors
//!
//! | Selector         | Targets                               |
//! |------------------|---------------------------------------|
//! | `window`         | The demo window                        |
//! | `.switch-list`   | Container around all rows              |
//! | `.switch-row`    | One label + switch pair                |
//! | `.switch-label`  | The variant name                       |
//! | `.switch`        | The drawing area hosting a switch      |
//!
//! The switches themselves are drawn in code; CSS only styles the
//! surrounding layout.
//!
//! Pointer drags map onto touch events: drag-begin → `Down`, drag-update
//! → `Move`, drag-end → `Up`, gesture cancel → `Cancel`.  A 16 ms timer
//! redraws every switch that is still animating.

use super::HostError;
use crate::color::Color;
use crate::config::Config;
use crate::geometry::{Rect, RoundedRect, Shadow};
use crate::gesture::TouchEvent;
use crate::switch::Switch;
use crate::traits::{Canvas, FnListener};
use crate::types::{KnobImage, SwitchState};
use gtk4::prelude::*;
use gtk4::{cairo, gdk_pixbuf, glib};
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

//  Default CSS

const DEFAULT_CSS: &str = r#"
.switch-list {
    padding: 24px;
}

.switch-row {
    margin: 8px 0;
}

.switch-label {
    min-width: 160px;
    font-weight: bold;
}
"#;

/// Shadow blur is approximated with this many stacked outlines.
const SHADOW_STEPS: u32 = 4;

//  Images

/// Decoded knob images, keyed by their configured path.
struct ImageCache {
    base: PathBuf,
    pixbufs: HashMap<PathBuf, Option<gdk_pixbuf::Pixbuf>>,
}

impl ImageCache {
    fn new(base: PathBuf) -> Self {
        Self {
            base,
            pixbufs: HashMap::new(),
        }
    }

    /// Decode `image` once; failures are logged and remembered.
    fn load(&mut self, image: &KnobImage) {
        if image.is_empty() || self.pixbufs.contains_key(&image.path) {
            return;
        }
        let path = if image.path.is_absolute() {
            image.path.clone()
        } else {
            self.base.join(&image.path)
        };
        let pixbuf = match gdk_pixbuf::Pixbuf::from_file(&path) {
            Ok(p) => {
                info!("knob image: {} ({}x{})", path.display(), p.width(), p.height());
                Some(p)
            }
            Err(e) => {
                warn!("knob image {} unavailable: {}", path.display(), e);
                None
            }
        };
        self.pixbufs.insert(image.path.clone(), pixbuf);
    }

    fn get(&self, image: &KnobImage) -> Option<&gdk_pixbuf::Pixbuf> {
        self.pixbufs.get(&image.path).and_then(Option::as_ref)
    }
}

//  Cairo canvas

/// Paints switch frames onto a cairo context.
struct CairoCanvas<'a> {
    cr: &'a cairo::Context,
    images: &'a ImageCache,
}

impl CairoCanvas<'_> {
    fn set_color(&self, color: Color) {
        self.cr.set_source_rgba(color.r, color.g, color.b, color.a);
    }

    fn path(&self, shape: &RoundedRect) {
        let r = shape.effective_radius();
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = shape.rect;
        let cr = self.cr;
        cr.new_sub_path();
        cr.arc(x + w - r, y + r, r, -FRAC_PI_2, 0.0);
        cr.arc(x + w - r, y + h - r, r, 0.0, FRAC_PI_2);
        cr.arc(x + r, y + h - r, r, FRAC_PI_2, PI);
        cr.arc(x + r, y + r, r, PI, PI + FRAC_PI_2);
        cr.close_path();
    }
}

impl Canvas for CairoCanvas<'_> {
    type Error = cairo::Error;

    fn fill_rounded_rect(&mut self, shape: RoundedRect, color: Color) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.path(&shape);
        self.cr.fill()
    }

    fn stroke_rounded_rect(
        &mut self,
        shape: RoundedRect,
        width: f64,
        color: Color,
    ) -> Result<(), cairo::Error> {
        let half = width / 2.0;
        let r = &shape.rect;
        let inset = RoundedRect::new(
            Rect::new(r.x + half, r.y + half, r.width - width, r.height - width),
            (shape.radius - half).max(0.0),
        );
        self.set_color(color);
        self.cr.set_line_width(width);
        self.path(&inset);
        self.cr.stroke()
    }

    fn shadow(&mut self, shape: RoundedRect, shadow: &Shadow) -> Result<(), cairo::Error> {
        let step_alpha = shadow.opacity / SHADOW_STEPS as f64;
        for i in 0..SHADOW_STEPS {
            let grow = shadow.radius * (i + 1) as f64 / SHADOW_STEPS as f64 / 2.0;
            let r = &shape.rect;
            let layer = RoundedRect::new(
                Rect::new(
                    r.x + shadow.offset_x - grow,
                    r.y + shadow.offset_y - grow,
                    r.width + grow * 2.0,
                    r.height + grow * 2.0,
                ),
                shape.radius + grow,
            );
            self.set_color(shadow.color.fade(step_alpha));
            self.path(&layer);
            self.cr.fill()?;
        }
        Ok(())
    }

    fn image(&mut self, shape: RoundedRect, image: &KnobImage) -> Result<(), cairo::Error> {
        let Some(pixbuf) = self.images.get(image) else {
            return Ok(());
        };
        let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
        if pw <= 0.0 || ph <= 0.0 {
            return Ok(());
        }
        let cr = self.cr;
        cr.save()?;
        self.path(&shape);
        cr.clip();
        cr.translate(shape.rect.x, shape.rect.y);
        cr.scale(shape.rect.width / pw, shape.rect.height / ph);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn push_clip(&mut self, shape: RoundedRect) -> Result<(), cairo::Error> {
        self.cr.save()?;
        self.path(&shape);
        self.cr.clip();
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), cairo::Error> {
        self.cr.restore()
    }
}

//  Per-switch widget

/// A switch, the area drawing it, and whether the last tick was animating.
struct Entry {
    switch: Rc<RefCell<Switch>>,
    area: gtk4::DrawingArea,
    animating: Cell<bool>,
}

fn build_entry(
    index: usize,
    mut switch: Switch,
    epoch: Instant,
    images: Rc<ImageCache>,
    list: &gtk4::Box,
) -> Entry {
    let variant = switch.variant();
    switch.set_listener(FnListener(move |state: SwitchState| {
        info!("switch {} ({}): {}", index, variant, state.label());
    }));

    let size = switch.size();
    let row = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
    row.add_css_class("switch-row");

    let label = gtk4::Label::new(Some(variant.label()));
    label.add_css_class("switch-label");
    label.set_xalign(0.0);
    row.append(&label);

    let area = gtk4::DrawingArea::new();
    area.add_css_class("switch");
    area.set_content_width(size.width.ceil() as i32);
    area.set_content_height(size.height.ceil() as i32);
    area.set_valign(gtk4::Align::Center);
    row.append(&area);
    list.append(&row);

    let switch = Rc::new(RefCell::new(switch));

    {
        let switch = Rc::clone(&switch);
        area.set_draw_func(move |_area, cr, _w, _h| {
            let frame = switch.borrow().frame(epoch.elapsed());
            let mut canvas = CairoCanvas {
                cr,
                images: images.as_ref(),
            };
            if let Err(e) = frame.paint(&mut canvas) {
                warn!("switch {}: paint failed: {}", index, e);
            }
        });
    }

    let drag = gtk4::GestureDrag::new();
    {
        let switch = Rc::clone(&switch);
        let area = area.clone();
        drag.connect_drag_begin(move |_g, x, _y| {
            switch
                .borrow_mut()
                .handle(TouchEvent::Down { x }, epoch.elapsed());
            area.queue_draw();
        });
    }
    {
        let switch = Rc::clone(&switch);
        let area = area.clone();
        drag.connect_drag_update(move |g, dx, _dy| {
            if let Some((sx, _)) = g.start_point() {
                switch
                    .borrow_mut()
                    .handle(TouchEvent::Move { x: sx + dx }, epoch.elapsed());
                area.queue_draw();
            }
        });
    }
    {
        let switch = Rc::clone(&switch);
        let area = area.clone();
        drag.connect_drag_end(move |g, dx, _dy| {
            let x = g.start_point().map(|(sx, _)| sx + dx).unwrap_or(dx);
            switch
                .borrow_mut()
                .handle(TouchEvent::Up { x }, epoch.elapsed());
            area.queue_draw();
        });
    }
    {
        let switch = Rc::clone(&switch);
        let area = area.clone();
        drag.connect_cancel(move |_g, _seq| {
            debug!("switch {}: drag cancelled", index);
            switch
                .borrow_mut()
                .handle(TouchEvent::Cancel, epoch.elapsed());
            area.queue_draw();
        });
    }
    area.add_controller(drag);

    Entry {
        switch,
        area,
        animating: Cell::new(false),
    }
}

//  Public API

/// Run the GTK4 demo on the **current** (main) thread until the window
/// is closed.
///
/// Relative knob image paths are resolved against `asset_dir`.
pub fn run_main_loop(
    config: Config,
    css_path: Option<PathBuf>,
    asset_dir: &Path,
) -> Result<(), HostError> {
    gtk4::init().map_err(|e| HostError::Init(e.to_string()))?;
    info!("GTK4 initialised on main thread");

    let switches = config.build_switches();

    let mut cache = ImageCache::new(asset_dir.to_path_buf());
    for switch in &switches {
        if let Some(image) = switch.image() {
            cache.load(image);
        }
    }
    let images = Rc::new(cache);

    let window = gtk4::Window::new();
    window.set_title(Some("SSTSwitch"));
    style_window(&window, &stylesheet(css_path.as_deref()));

    let list = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    list.add_css_class("switch-list");
    list.set_halign(gtk4::Align::Center);
    list.set_valign(gtk4::Align::Center);
    window.set_child(Some(&list));

    let epoch = Instant::now();
    let entries: Vec<Entry> = switches
        .into_iter()
        .enumerate()
        .map(|(i, sw)| build_entry(i, sw, epoch, Rc::clone(&images), &list))
        .collect();
    info!(
        "demo ready: {} switch(es), drag threshold {}, CSS: {}",
        entries.len(),
        config.gestures.drag_threshold,
        css_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<built-in>".into()),
    );

    let main_loop = glib::MainLoop::new(None, false);
    {
        let main_loop = main_loop.clone();
        window.connect_close_request(move |_| {
            info!("window closed");
            main_loop.quit();
            glib::Propagation::Proceed
        });
    }
    window.present();

    //  Redraw loop (~60 fps)
    glib::timeout_add_local(Duration::from_millis(16), move || {
        let now = epoch.elapsed();
        for entry in &entries {
            let animating = entry.switch.borrow().is_animating(now);
            // One extra draw after the last tick lands the final value.
            if animating || entry.animating.get() {
                entry.area.queue_draw();
            }
            entry.animating.set(animating);
        }
        glib::ControlFlow::Continue
    });

    info!("entering GLib main loop");
    main_loop.run();
    info!("GLib main loop exited");
    Ok(())
}

//  Styling

/// The demo stylesheet: the user's file when it can be read, otherwise
/// the built-in one.
fn stylesheet(css_path: Option<&Path>) -> String {
    let Some(path) = css_path else {
        return DEFAULT_CSS.to_string();
    };
    match std::fs::read_to_string(path) {
        Ok(css) => {
            info!("styling switches with {}", path.display());
            css
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} not found, keeping the built-in style", path.display());
            DEFAULT_CSS.to_string()
        }
        Err(e) => {
            warn!("ignoring stylesheet {}: {}", path.display(), e);
            DEFAULT_CSS.to_string()
        }
    }
}

/// Attach `css` to the display `window` lives on.
fn style_window(window: &gtk4::Window, css: &str) {
    let provider = gtk4::CssProvider::new();
    #[allow(deprecated)]
    provider.load_from_data(css);
    gtk4::style_context_add_provider_for_display(
        &window.display(),
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
