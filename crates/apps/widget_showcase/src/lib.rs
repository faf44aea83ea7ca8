//! Browser showcase for the form widget library.
//!
//! Mounts every widget with realistic props so behavior can be reviewed end to end. The demo
//! values survive reloads through `localStorage`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use chrono::{Duration as Days, Local};
use leptos::*;
use serde::{Deserialize, Serialize};
use widget_ui::prelude::*;
use widget_ui::{format_slider_value, MenuItemClick};

const STORAGE_KEY: &str = "widget-showcase.state.v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ShowcaseState {
    volume: SliderValue,
    price: SliderValue,
    stay: Option<DateRangeValue>,
    fruit: Vec<String>,
    page: Vec<String>,
    reveal_password: bool,
}

impl Default for ShowcaseState {
    fn default() -> Self {
        Self {
            volume: SliderValue::Single(4.0),
            price: SliderValue::Range(20.0, 60.0),
            stay: None,
            fruit: Vec::new(),
            page: vec!["overview".to_string()],
            reveal_password: false,
        }
    }
}

/// Parses a stored snapshot, falling back to defaults when it is missing or stale.
fn restore_state(raw: Option<&str>) -> ShowcaseState {
    let Some(raw) = raw else {
        return ShowcaseState::default();
    };
    match serde_json::from_str(raw) {
        Ok(state) => state,
        Err(err) => {
            logging::warn!("showcase state discarded: {err}");
            ShowcaseState::default()
        }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

fn load_state() -> ShowcaseState {
    let raw = local_storage().and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
    restore_state(raw.as_deref())
}

fn slider_text(value: SliderValue) -> String {
    match value {
        SliderValue::Single(value) => format_slider_value(value),
        SliderValue::Range(lower, upper) => {
            format!("{} - {}", format_slider_value(lower), format_slider_value(upper))
        }
    }
}

fn stay_shortcuts() -> Vec<Shortcut> {
    let today = Local::now().date_naive();
    let start = today.and_time(widget_core::date::midnight());
    [("Next 7 days", 7), ("Next 30 days", 30)]
        .into_iter()
        .map(|(label, days)| Shortcut {
            label: label.to_string(),
            value: DateRangeValue::new(start, start + Days::days(days)),
        })
        .collect()
}

fn docs_menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry::Item {
            value: "overview".to_string(),
            label: "Overview".to_string(),
            icon: Some("document".to_string()),
            disabled: false,
        },
        MenuEntry::sub_menu(
            "components",
            "Components",
            vec![
                MenuEntry::item("slider", "Slider"),
                MenuEntry::item("range-picker", "Range picker"),
                MenuEntry::sub_menu(
                    "overlays",
                    "Overlays",
                    vec![
                        MenuEntry::item("trigger", "Trigger"),
                        MenuEntry::item("select", "Select"),
                    ],
                ),
            ],
        ),
        MenuEntry::item("changelog", "Changelog").disabled(),
    ]
}

#[component]
/// Showcase page with one section per widget.
pub fn WidgetShowcaseApp() -> impl IntoView {
    let initial = load_state();
    let state = create_rw_signal(initial.clone());
    let last_saved = create_rw_signal::<Option<String>>(None);
    let last_event = create_rw_signal(String::new());

    create_effect(move |_| {
        let snapshot = state.get();
        let serialized = match serde_json::to_string(&snapshot) {
            Ok(serialized) => serialized,
            Err(err) => {
                logging::warn!("showcase serialize failed: {err}");
                return;
            }
        };
        if last_saved.get_untracked().as_deref() == Some(serialized.as_str()) {
            return;
        }
        if let Some(storage) = local_storage() {
            if let Err(err) = storage.set_item(STORAGE_KEY, &serialized) {
                logging::warn!("showcase persist failed: {err:?}");
            }
        }
        last_saved.set(Some(serialized));
    });

    let upload = create_upload(UploadConfig {
        accept: "image/*,.pdf".to_string(),
        multiple: true,
        limit: Some(4),
        max_size: Some(5 * 1024 * 1024),
        ..UploadConfig::default()
    });
    // No backend here: transfers are simulated with timers.
    let upload = upload
        .on_start(Callback::new(move |(uid, file): (u64, web_sys::File)| {
            logging::log!("upload started: {}", file.name());
            set_timeout(move || upload.progress(uid, 45.0), Duration::from_millis(300));
            set_timeout(
                move || {
                    if file.name().contains("fail") {
                        upload.fail(uid, "Server refused the file");
                    } else {
                        upload.succeed(uid);
                    }
                },
                Duration::from_millis(900),
            );
        }))
        .on_reject(Callback::new(move |rejection: UploadRejection| {
            last_event.set(rejection.to_string());
        }));

    view! {
        <main class="widget-showcase">
            <div class="widget-showcase-sections">
                <h1>"Form widgets"</h1>
                <p data-ui-slot="last-event">{move || last_event.get()}</p>

                <section>
                    <div class="widget-showcase-section">
                        <h2>"Slider"</h2>
                        <Slider
                            config=SliderConfig {
                                show_ticks: true,
                                start_mark: true,
                                end_mark: true,
                                ..SliderConfig::default()
                            }
                            value=Signal::derive(move || Some(state.get().volume))
                            on_change=Callback::new(move |value| {
                                state.update(|state| state.volume = value)
                            })
                            aria_label="Volume"
                        />
                        <Slider
                            config=SliderConfig {
                                min: 0.0,
                                max: 100.0,
                                step: 5.0,
                                range: true,
                                ..SliderConfig::default()
                            }
                            value=Signal::derive(move || Some(state.get().price))
                            on_change=Callback::new(move |value| {
                                state.update(|state| state.price = value)
                            })
                            on_after_change=Callback::new(move |value| {
                                last_event.set(format!("price settled at {}", slider_text(value)))
                            })
                            aria_label="Price"
                        />
                        <p>
                            {move || {
                                let state = state.get();
                                format!(
                                    "volume {} / price {}",
                                    slider_text(state.volume),
                                    slider_text(state.price),
                                )
                            }}
                        </p>
                    </div>
                </section>

                <section>
                    <div class="widget-showcase-section">
                        <h2>"Range date picker"</h2>
                        <RangeDatePicker
                            config=RangePickerConfig {
                                shortcuts: stay_shortcuts(),
                                shortcuts_placement: ShortcutPlacement::Left,
                                default_value: initial.stay,
                                ..RangePickerConfig::default()
                            }
                            on_change=Callback::new(move |(_, value): RangeChange| {
                                state.update(|state| state.stay = Some(value))
                            })
                            on_clear=Callback::new(move |_| state.update(|state| state.stay = None))
                        />
                        <RangeDatePicker
                            config=RangePickerConfig {
                                show_time: true,
                                placeholder: ["Check in".to_string(), "Check out".to_string()],
                                ..RangePickerConfig::default()
                            }
                            on_ok=Callback::new(move |(text, _): RangeChange| {
                                last_event.set(format!("confirmed {} to {}", text[0], text[1]))
                            })
                        />
                    </div>
                </section>

                <section>
                    <div class="widget-showcase-section">
                        <h2>"Menu"</h2>
                        <Menu
                            config=MenuConfig {
                                items: docs_menu(),
                                default_selected: initial.page.clone(),
                                ..MenuConfig::default()
                            }
                            on_click_item=Callback::new(move |(value, path): MenuItemClick| {
                                last_event.set(format!("menu {value} via {}", path.join(" / ")))
                            })
                            on_selected_change=Callback::new(move |page| {
                                state.update(|state| state.page = page)
                            })
                            aria_label="Documentation"
                        />
                        <Menu
                            config=MenuConfig {
                                items: docs_menu(),
                                mode: MenuMode::Horizontal,
                                ..MenuConfig::default()
                            }
                            aria_label="Top navigation"
                        />
                    </div>
                </section>

                <section>
                    <div class="widget-showcase-section">
                        <h2>"Select"</h2>
                        <Select
                            config=SelectConfig {
                                options: vec![
                                    SelectOption::new("apple").with_label("Apple"),
                                    SelectOption::new("pear").with_label("Pear"),
                                    SelectOption::new("quince").with_label("Quince").disabled(),
                                    SelectOption::new("fig").with_label("Fig"),
                                ],
                                multiple: true,
                                allow_clear: true,
                                ..SelectConfig::default()
                            }
                            value=Signal::derive(move || Some(state.get().fruit))
                            on_change=Callback::new(move |fruit| {
                                state.update(|state| state.fruit = fruit)
                            })
                            aria_label="Fruit"
                        />
                    </div>
                </section>

                <section>
                    <div class="widget-showcase-section">
                        <h2>"Password"</h2>
                        <PasswordInput
                            config=PasswordConfig {
                                allow_clear: true,
                                max_length: Some(32),
                                ..PasswordConfig::default()
                            }
                            visible=Signal::derive(move || Some(state.get().reveal_password))
                            on_visibility_change=Callback::new(move |visible| {
                                state.update(|state| state.reveal_password = visible)
                            })
                        />
                    </div>
                </section>

                <section>
                    <div class="widget-showcase-section">
                        <h2>"Trigger"</h2>
                        <div class="widget-showcase-row">
                            <Trigger popup=move || view! { <p>"Opened by click"</p> }>
                                <Button>"Click"</Button>
                            </Trigger>
                            <Trigger
                                config=TriggerConfig {
                                    mode: TriggerMode::Hover,
                                    position: TriggerPosition::Top,
                                    ..TriggerConfig::default()
                                }
                                popup=move || view! { <p>"Opened by hover"</p> }
                            >
                                <Button variant=ButtonVariant::Quiet>"Hover"</Button>
                            </Trigger>
                        </div>
                    </div>
                </section>

                <section>
                    <div class="widget-showcase-section">
                        <h2>"Upload"</h2>
                        <Upload handle=upload label="Attach files" />
                    </div>
                </section>
            </div>
        </main>
    }
}

/// Mounts the showcase into the document body.
#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| view! { <WidgetShowcaseApp /> })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_or_stale_snapshots_fall_back_to_defaults() {
        assert_eq!(restore_state(None), ShowcaseState::default());
        assert_eq!(restore_state(Some("{not json")), ShowcaseState::default());
    }

    #[test]
    fn partial_snapshots_keep_the_remaining_defaults() {
        let restored = restore_state(Some(r#"{"fruit":["pear"],"volume":7}"#));
        assert_eq!(restored.fruit, vec!["pear".to_string()]);
        assert_eq!(restored.volume, SliderValue::Single(7.0));
        assert_eq!(restored.price, ShowcaseState::default().price);
    }

    #[test]
    fn range_slider_text_joins_both_handles() {
        assert_eq!(slider_text(SliderValue::Range(20.0, 62.5)), "20 - 62.5");
        assert_eq!(slider_text(SliderValue::Single(4.0)), "4");
    }
}
