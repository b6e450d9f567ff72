//! Web runtime for lorelist.
//!
//! Builds the page (toolbar, scroll surface, overlays), forwards DOM events
//! into the [`ListApp`], and once per animation frame runs
//! layout → DOM patch → measure → re-layout until the heights settle.

use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use lorelist_core::LoremGenerator;
use lorelist_platform_web::{LocalStorage, WebPlatform};
use lorelist_ui::{
    ListApp, ListScene, PointerEventKind, RowNode, ToolbarAction, ToolbarState,
    REMOVE_BUTTON_INSET, REMOVE_BUTTON_SIZE,
};
use lorelist_ui_graphics::{Point, Rect, Size};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlInputElement};
use web_time::Instant;

use crate::launcher::AppLauncher;

type WebApp = ListApp<LoremGenerator, LocalStorage>;

/// Frames slower than this are logged.
const SLOW_FRAME: Duration = Duration::from_millis(32);

/// Mounts the application and starts the frame loop.
///
/// Called by `AppLauncher::run_web()`.
pub fn run(launcher: AppLauncher) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or("no global window exists")?;
    let document = window.document().ok_or("should have a document on window")?;
    let root_id = launcher.settings().root_id.clone();
    let root = document
        .get_element_by_id(&root_id)
        .ok_or_else(|| format!("element with id '{}' not found", root_id))?
        .dyn_into::<HtmlElement>()?;

    let store = match LocalStorage::from_window() {
        Ok(store) => Some(store),
        Err(err) => {
            log::warn!("persistence disabled: {}", err);
            None
        }
    };
    let app: Rc<RefCell<WebApp>> = Rc::new(RefCell::new(launcher.build(store)));
    let dom = Rc::new(RefCell::new(ListDom::mount(&document, &root)?));
    let platform = WebPlatform;

    {
        let app = app.clone();
        let input = dom.borrow().count_input.clone();
        let target = input.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            app.borrow_mut().set_count_input(input.value());
        }) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    for (action, button) in dom.borrow().buttons() {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            app.borrow_mut().dispatch(action);
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let app = app.clone();
        let scroller = dom.borrow().scroller.clone();
        let target = scroller.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            app.borrow_mut().on_scroll(scroller.scroll_top() as f32);
        }) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    for event_type in [
        "pointerdown",
        "pointermove",
        "pointerup",
        "pointercancel",
        "lostpointercapture",
    ] {
        let app = app.clone();
        let surface = dom.borrow().surface.clone();
        let scroller = dom.borrow().scroller.clone();
        let target = surface.clone();
        let closure = Closure::wrap(Box::new(move |event: web_sys::PointerEvent| {
            let rect = scroller.get_bounding_client_rect();
            let origin = Point::new(rect.left() as f32, rect.top() as f32);
            let Some(pointer) = platform.translate(&event, origin) else {
                return;
            };
            let mut app = app.borrow_mut();
            let was_active = app.list().drag().is_active();
            app.pointer_event(&pointer);
            let is_active = app.list().drag().is_active();
            if pointer.kind == PointerEventKind::Down && is_active {
                // Keep receiving moves once the pointer leaves the surface.
                if let Err(err) = surface.set_pointer_capture(event.pointer_id()) {
                    log::debug!("pointer capture refused: {:?}", err);
                }
            }
            if was_active || is_active {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let render_loop: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let render_loop_clone = render_loop.clone();

    *render_loop.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let started = Instant::now();
        if let Err(err) = frame(&mut app.borrow_mut(), &mut dom.borrow_mut()) {
            log::error!("frame failed: {:?}", err);
        }
        let elapsed = started.elapsed();
        if elapsed > SLOW_FRAME {
            log::debug!("slow frame: {:?}", elapsed);
        }

        if let Some(next) = render_loop_clone.borrow().as_ref() {
            if let Err(err) = request_animation_frame(next) {
                log::error!("requestAnimationFrame failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = render_loop.borrow().as_ref() {
        request_animation_frame(first)?;
    }
    Ok(())
}

fn frame(app: &mut WebApp, dom: &mut ListDom) -> Result<(), JsValue> {
    app.set_viewport(dom.viewport_size());
    app.drag_autoscroll();
    if app.needs_layout() {
        let passes = app.list().config().max_layout_passes;
        for pass in 0..passes {
            let scene = app.layout();
            dom.patch(&scene)?;
            if let Some(target) = scene.scroll_request {
                dom.scroller.set_scroll_top(target.round() as i32);
            }
            for (index, height) in dom.measure_rows() {
                app.record_row_height(index, height);
            }
            if !app.needs_layout() {
                log::trace!("layout settled after {} passes", pass + 1);
                break;
            }
        }
    }
    dom.update_toolbar(app.toolbar_state());
    Ok(())
}

fn request_animation_frame(f: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or("no global window exists")?
        .request_animation_frame(f.as_ref().unchecked_ref())
}

struct MountedRow {
    element: HtmlElement,
    label: HtmlElement,
    text: HtmlElement,
    shown_label: String,
    shown_text: String,
}

impl MountedRow {
    fn create(document: &Document) -> Result<Self, JsValue> {
        let element: HtmlElement = create(document, "div")?;
        element.set_class_name("lorelist-row");
        element.style().set_css_text(&format!(
            "position:absolute;left:0;right:0;box-sizing:border-box;\
             padding:12px {}px 12px 12px;border-bottom:1px solid #ddd;\
             background:#fff;cursor:grab;user-select:none;touch-action:pan-y",
            REMOVE_BUTTON_SIZE + 2.0 * REMOVE_BUTTON_INSET
        ));

        let label: HtmlElement = create(document, "span")?;
        label.set_class_name("lorelist-row-index");
        label.style().set_css_text("font-weight:bold;color:#888");

        let text: HtmlElement = create(document, "div")?;
        text.set_class_name("lorelist-row-text");
        text.style().set_css_text("white-space:pre-wrap;margin-top:4px");

        let remove: HtmlElement = create(document, "span")?;
        remove.set_class_name("lorelist-row-remove");
        remove.set_text_content(Some("X"));
        remove.style().set_css_text(&format!(
            "position:absolute;top:{inset}px;right:{inset}px;width:{size}px;\
             height:{size}px;line-height:{size}px;text-align:center;cursor:pointer",
            inset = REMOVE_BUTTON_INSET,
            size = REMOVE_BUTTON_SIZE
        ));

        element.append_child(&label)?;
        element.append_child(&text)?;
        element.append_child(&remove)?;
        Ok(Self {
            element,
            label,
            text,
            shown_label: String::new(),
            shown_text: String::new(),
        })
    }

    fn update(&mut self, node: &RowNode) -> Result<(), JsValue> {
        if self.shown_label != node.label {
            self.label.set_text_content(Some(&node.label));
            self.shown_label.clone_from(&node.label);
        }
        if self.shown_text != node.text {
            self.text.set_text_content(Some(&node.text));
            self.shown_text.clone_from(&node.text);
        }
        let style = self.element.style();
        style.set_property("top", &px(node.content_bounds.y))?;
        style.set_property("opacity", if node.is_drag_source { "0.35" } else { "1" })?;
        Ok(())
    }
}

struct ListDom {
    document: Document,
    count_input: HtmlInputElement,
    generate: HtmlButtonElement,
    reset: HtmlButtonElement,
    save: HtmlButtonElement,
    load: HtmlButtonElement,
    /// Positioned box holding the scroller and the overlays.
    surface: HtmlElement,
    scroller: HtmlElement,
    /// Sized to the total content height so the scrollbar spans every row.
    spacer: HtmlElement,
    preview: HtmlElement,
    preview_label: HtmlElement,
    preview_text: HtmlElement,
    drop_indicator: HtmlElement,
    scroll_to_bottom: HtmlElement,
    rows: HashMap<usize, MountedRow>,
}

impl ListDom {
    fn mount(document: &Document, root: &HtmlElement) -> Result<Self, JsValue> {
        root.style()
            .set_css_text("display:flex;flex-direction:column;height:100vh;row-gap:25px");

        let toolbar: HtmlElement = create(document, "div")?;
        toolbar.style().set_css_text(
            "display:grid;grid-template-columns:50% 1fr 1fr;column-gap:6px;row-gap:6px",
        );
        let count_input: HtmlInputElement = create(document, "input")?;
        count_input.set_type("number");
        count_input.set_placeholder("# of Items");
        let generate = button(document, "Generate")?;
        let reset = button(document, "Reset")?;
        let gap: HtmlElement = create(document, "div")?;
        let save = button(document, "Save to localStorage")?;
        let load = button(document, "Load from localStorage")?;
        toolbar.append_child(&count_input)?;
        toolbar.append_child(&generate)?;
        toolbar.append_child(&reset)?;
        toolbar.append_child(&gap)?;
        toolbar.append_child(&save)?;
        toolbar.append_child(&load)?;

        let surface: HtmlElement = create(document, "div")?;
        surface.style().set_css_text("position:relative;flex:1;min-height:0");
        let scroller: HtmlElement = create(document, "div")?;
        scroller
            .style()
            .set_css_text("position:absolute;top:0;left:0;right:0;bottom:0;overflow-y:auto");
        let spacer: HtmlElement = create(document, "div")?;
        spacer.style().set_css_text("position:relative;width:100%;height:0");
        scroller.append_child(&spacer)?;

        let preview: HtmlElement = create(document, "div")?;
        preview.style().set_css_text(
            "position:absolute;left:0;display:none;box-sizing:border-box;padding:12px;\
             background:#fff;opacity:0.85;box-shadow:0 4px 12px rgba(0,0,0,0.3);\
             pointer-events:none;overflow:hidden",
        );
        let preview_label: HtmlElement = create(document, "span")?;
        preview_label.style().set_css_text("font-weight:bold;color:#888");
        let preview_text: HtmlElement = create(document, "div")?;
        preview_text
            .style()
            .set_css_text("white-space:pre-wrap;margin-top:4px");
        preview.append_child(&preview_label)?;
        preview.append_child(&preview_text)?;

        let drop_indicator: HtmlElement = create(document, "div")?;
        drop_indicator.style().set_css_text(
            "position:absolute;left:0;right:0;height:2px;margin-top:-1px;\
             background:#2b7cff;display:none;pointer-events:none",
        );

        let scroll_to_bottom: HtmlElement = create(document, "div")?;
        scroll_to_bottom.set_text_content(Some("Scroll to Bottom"));
        scroll_to_bottom.style().set_css_text(
            "position:absolute;display:none;box-sizing:border-box;border-radius:16px;\
             background:#2b7cff;color:#fff;text-align:center;cursor:pointer;\
             pointer-events:none",
        );

        surface.append_child(&scroller)?;
        surface.append_child(&drop_indicator)?;
        surface.append_child(&preview)?;
        surface.append_child(&scroll_to_bottom)?;
        root.append_child(&toolbar)?;
        root.append_child(&surface)?;

        Ok(Self {
            document: document.clone(),
            count_input,
            generate,
            reset,
            save,
            load,
            surface,
            scroller,
            spacer,
            preview,
            preview_label,
            preview_text,
            drop_indicator,
            scroll_to_bottom,
            rows: HashMap::new(),
        })
    }

    fn buttons(&self) -> Vec<(ToolbarAction, HtmlButtonElement)> {
        vec![
            (ToolbarAction::Generate, self.generate.clone()),
            (ToolbarAction::Reset, self.reset.clone()),
            (ToolbarAction::Save, self.save.clone()),
            (ToolbarAction::Load, self.load.clone()),
        ]
    }

    /// Scroll surface size without its scrollbar.
    fn viewport_size(&self) -> Size {
        Size::new(
            self.scroller.client_width() as f32,
            self.scroller.client_height() as f32,
        )
    }

    fn patch(&mut self, scene: &ListScene) -> Result<(), JsValue> {
        self.spacer
            .style()
            .set_property("height", &px(scene.total_content_height))?;

        let mounted: HashSet<usize> = scene.mounted_indices().collect();
        self.rows.retain(|index, row| {
            let keep = mounted.contains(index);
            if !keep {
                row.element.remove();
            }
            keep
        });

        for node in &scene.rows {
            let row = match self.rows.entry(node.index) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let row = MountedRow::create(&self.document)?;
                    self.spacer.append_child(&row.element)?;
                    entry.insert(row)
                }
            };
            row.update(node)?;
        }

        match &scene.drag_preview {
            Some(preview) => {
                if self.preview_text.text_content().as_deref() != Some(preview.text.as_str()) {
                    self.preview_label.set_text_content(Some(&preview.label));
                    self.preview_text.set_text_content(Some(&preview.text));
                }
                place(&self.preview, preview.bounds)?;
                self.preview.style().set_property("display", "block")?;
            }
            None => self.preview.style().set_property("display", "none")?,
        }

        match scene.drop_indicator {
            Some(y) => {
                let style = self.drop_indicator.style();
                style.set_property("top", &px(y))?;
                style.set_property("display", "block")?;
            }
            None => self.drop_indicator.style().set_property("display", "none")?,
        }

        match scene.scroll_to_bottom_button {
            Some(bounds) => {
                place(&self.scroll_to_bottom, bounds)?;
                let style = self.scroll_to_bottom.style();
                style.set_property("line-height", &px(bounds.height))?;
                style.set_property("display", "block")?;
            }
            None => self.scroll_to_bottom.style().set_property("display", "none")?,
        }
        Ok(())
    }

    fn measure_rows(&self) -> Vec<(usize, f32)> {
        self.rows
            .iter()
            .map(|(&index, row)| {
                let height = row.element.get_bounding_client_rect().height() as f32;
                (index, height)
            })
            .collect()
    }

    fn update_toolbar(&self, state: ToolbarState) {
        self.generate.set_disabled(!state.generate_enabled);
        self.reset.set_disabled(!state.reset_enabled);
        self.save.set_disabled(!state.save_enabled);
        self.load.set_disabled(!state.load_enabled);
    }
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(JsValue::from)
}

fn button(document: &Document, label: &str) -> Result<HtmlButtonElement, JsValue> {
    let button: HtmlButtonElement = create(document, "button")?;
    button.set_text_content(Some(label));
    Ok(button)
}

fn place(element: &HtmlElement, bounds: Rect) -> Result<(), JsValue> {
    let style = element.style();
    style.set_property("left", &px(bounds.x))?;
    style.set_property("top", &px(bounds.y))?;
    style.set_property("width", &px(bounds.width))?;
    style.set_property("height", &px(bounds.height))?;
    Ok(())
}

fn px(value: f32) -> String {
    format!("{}px", value)
}
