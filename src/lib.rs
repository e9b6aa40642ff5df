mod color;
mod config;
mod error;
mod field;
mod particle;
mod surface;
mod utils;

pub use color::Color;
pub use config::{FieldConfig, Lifecycle, Range};
pub use error::ConfigError;
pub use field::{connection_alpha, Bounds, Field};
pub use particle::Particle;
pub use surface::{CanvasSurface, Surface};

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

const CANVAS_STYLE: &str = "position: absolute; top: 0; left: 0; width: 100%; height: 100%; \
                            pointer-events: none; z-index: 1;";

// A DOM event listener that detaches itself when dropped
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Listener, JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Listener {
            target,
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            console::debug_1(&format!("particle field: failed to remove {} listener", self.event).into());
            console::debug_1(&e);
        }
    }
}

// Everything that only exists once the field found its container
struct Attached {
    container: Element,
    surface: CanvasSurface,
    field: Field,
}

impl Attached {
    // Canvas pixel size follows the container's bounding box. The browser
    // truncates fractional canvas sizes, so the simulation uses the
    // truncated values too.
    fn sync_size(&mut self) {
        let (width, height) = container_size(&self.container);
        self.surface.set_size(width, height);
        self.field.resize(Bounds::new(width as f64, height as f64));
    }

    fn pointer_moved(&mut self, client_x: f64, client_y: f64) {
        let rect = self.container.get_bounding_client_rect();
        self.field.set_pointer(client_x - rect.left(), client_y - rect.top());
    }

    fn frame(&mut self) {
        #[cfg(feature = "timing")]
        let _timer = utils::Timer::new("ParticleField::frame");
        self.field.frame(&mut self.surface);
    }
}

#[derive(Default)]
struct Shared {
    attached: Option<Attached>,
    frame_id: Option<i32>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn container_size(container: &Element) -> (u32, u32) {
    let rect = container.get_bounding_client_rect();
    (rect.width().max(0.0) as u32, rect.height().max(0.0) as u32)
}

fn lookup_container(container_id: &str) -> Option<(Window, Document, Element)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let container = document.get_element_by_id(container_id)?;
    Some((window, document, container))
}

/// Decorative particle background attached to a container element.
///
/// Created with [`ParticleField::initialize`]. If the container is missing
/// the returned field is inert: it holds no particles, draws nothing and
/// every method is a no-op.
#[wasm_bindgen]
pub struct ParticleField {
    state: Rc<RefCell<Shared>>,
    frame_callback: FrameCallback,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ParticleField {
    /// Attaches a canvas to the element with id `container_id`, fills it
    /// with particles and starts the animation loop.
    ///
    /// `config_json` is a JSON object of [`FieldConfig`] options, any of
    /// which may be left out. Invalid configuration is the only error; a
    /// missing container yields an inert field.
    pub fn initialize(container_id: &str, config_json: Option<String>) -> Result<ParticleField, JsValue> {
        utils::set_panic_hook();

        let config = match config_json {
            Some(json) => FieldConfig::from_json(&json)?,
            None => FieldConfig::default(),
        };

        let mut particle_field = ParticleField {
            state: Rc::new(RefCell::new(Shared::default())),
            frame_callback: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        };

        let (window, document, container) = match lookup_container(container_id) {
            Some(found) => found,
            None => {
                console::debug_1(&format!("particle field: no #{} container, skipping", container_id).into());
                return Ok(particle_field);
            }
        };

        let (width, height) = container_size(&container);
        let field = Field::new(config, Bounds::new(width as f64, height as f64))?;

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_attribute("style", CANVAS_STYLE)?;
        let surface = CanvasSurface::new(canvas)?;
        surface.set_size(width, height);
        container.append_child(&surface.canvas)?;

        console::log_1(
            &format!(
                "particle field: {} particles on {}x{} surface",
                field.particles().len(),
                width,
                height
            )
            .into(),
        );

        particle_field.state.borrow_mut().attached = Some(Attached {
            container,
            surface,
            field,
        });
        particle_field.bind_events(&window, &document)?;
        particle_field.start(&window)?;
        Ok(particle_field)
    }

    /// Records a pointer position given in document (client) coordinates.
    #[wasm_bindgen(js_name = onPointerMove)]
    pub fn on_pointer_move(&self, client_x: f64, client_y: f64) {
        if let Some(attached) = self.state.borrow_mut().attached.as_mut() {
            attached.pointer_moved(client_x, client_y);
        }
    }

    /// Re-reads the container size and resizes the canvas to match.
    /// Existing particles are left where they are.
    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&self) {
        if let Some(attached) = self.state.borrow_mut().attached.as_mut() {
            attached.sync_size();
        }
    }

    /// Advances and redraws one frame without touching the animation loop.
    pub fn tick(&self) {
        if let Some(attached) = self.state.borrow_mut().attached.as_mut() {
            attached.frame();
        }
    }

    /// Stops the animation loop, detaches event listeners and removes the
    /// canvas. Safe to call more than once.
    pub fn destroy(&mut self) {
        let attached = {
            let mut shared = self.state.borrow_mut();
            if let (Some(id), Some(window)) = (shared.frame_id.take(), web_sys::window()) {
                if let Err(e) = window.cancel_animation_frame(id) {
                    console::debug_1(&e);
                }
            }
            shared.attached.take()
        };
        // Dropping the frame closure also breaks its reference back to itself
        self.frame_callback.borrow_mut().take();
        self.listeners.clear();
        if let Some(attached) = attached {
            attached.surface.canvas.remove();
        }
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.state
            .borrow()
            .attached
            .as_ref()
            .map_or(0, |a| a.field.particles().len() as u32)
    }

    /// Last pointer position in surface coordinates, `[x, y]`.
    pub fn pointer(&self) -> Vec<f64> {
        self.state
            .borrow()
            .attached
            .as_ref()
            .map_or_else(|| vec![0.0, 0.0], |a| a.field.pointer().to_vec())
    }

    #[wasm_bindgen(js_name = surfaceWidth)]
    pub fn surface_width(&self) -> u32 {
        self.state
            .borrow()
            .attached
            .as_ref()
            .map_or(0, |a| a.surface.canvas.width())
    }

    #[wasm_bindgen(js_name = surfaceHeight)]
    pub fn surface_height(&self) -> u32 {
        self.state
            .borrow()
            .attached
            .as_ref()
            .map_or(0, |a| a.surface.canvas.height())
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.state.borrow().frame_id.is_some()
    }
}

impl ParticleField {
    fn bind_events(&mut self, window: &Window, document: &Document) -> Result<(), JsValue> {
        let state = Rc::clone(&self.state);
        let on_resize = Closure::wrap(Box::new(move |_: Event| {
            if let Some(attached) = state.borrow_mut().attached.as_mut() {
                attached.sync_size();
            }
        }) as Box<dyn FnMut(Event)>);
        self.listeners
            .push(Listener::attach(window.clone().into(), "resize", on_resize)?);

        let state = Rc::clone(&self.state);
        let on_move = Closure::wrap(Box::new(move |event: Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                if let Some(attached) = state.borrow_mut().attached.as_mut() {
                    attached.pointer_moved(event.client_x() as f64, event.client_y() as f64);
                }
            }
        }) as Box<dyn FnMut(Event)>);
        self.listeners
            .push(Listener::attach(document.clone().into(), "mousemove", on_move)?);
        Ok(())
    }

    // Runs a frame on every display refresh until destroy() drops the
    // callback. The closure reschedules itself through the shared slot.
    fn start(&self, window: &Window) -> Result<(), JsValue> {
        let state = Rc::clone(&self.state);
        let callback = Rc::clone(&self.frame_callback);
        let scheduler = window.clone();
        let frame = Closure::wrap(Box::new(move || {
            let mut shared = state.borrow_mut();
            match shared.attached.as_mut() {
                Some(attached) => attached.frame(),
                None => return,
            }
            shared.frame_id = callback
                .borrow()
                .as_ref()
                .and_then(|cb| scheduler.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }) as Box<dyn FnMut()>);

        let id = window.request_animation_frame(frame.as_ref().unchecked_ref())?;
        *self.frame_callback.borrow_mut() = Some(frame);
        self.state.borrow_mut().frame_id = Some(id);
        Ok(())
    }
}

impl Drop for ParticleField {
    fn drop(&mut self) {
        self.destroy();
    }
}
