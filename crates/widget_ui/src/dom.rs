//! Small DOM queries the widgets feed back into their reducers.

use wasm_bindgen::JsCast;

/// Whether `ev` originated inside `container`.
pub(crate) fn event_within(ev: &web_sys::Event, container: &web_sys::Element) -> bool {
    let Some(target) = ev.target() else {
        return false;
    };
    let Ok(node) = target.dyn_into::<web_sys::Node>() else {
        return false;
    };
    container.contains(Some(&node))
}

/// Rendered width of `element` in CSS pixels.
pub(crate) fn element_width(element: &web_sys::Element) -> f64 {
    element.get_bounding_client_rect().width()
}

/// Horizontal offset of `client_x` from the left edge of `element`.
pub(crate) fn offset_from_left(element: &web_sys::Element, client_x: i32) -> f64 {
    f64::from(client_x) - element.get_bounding_client_rect().left()
}

/// Reads the files of an `<input type="file">` change event.
pub(crate) fn input_files(ev: &web_sys::Event) -> Vec<web_sys::File> {
    let Some(input) = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let Some(list) = input.files() else {
        return Vec::new();
    };
    let files = (0..list.length()).filter_map(|index| list.item(index)).collect();
    // Reset so picking the same file again still fires `change`.
    input.set_value("");
    files
}
