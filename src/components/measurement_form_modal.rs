//! Measurement Form Modal
//!
//! Create/edit dialog over the `MeasurementForm` held in the page's editor
//! state. Template rows follow the selected garment; custom rows are free
//! name/value pairs. Each row may carry its own unit; blank rows use the
//! default unit.

use atelier_core::{
    CustomField, EditorEvent, EditorState, GarmentType, MeasurementForm, NoticeLevel, Submission,
    TemplateRow,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::measurement_page::dispatch;
use super::{GarmentSelector, Modal};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

const UNITS: &[&str] = &["in", "cm"];

fn with_form(editor: RwSignal<EditorState>, change: impl FnOnce(&mut MeasurementForm)) {
    editor.update(|state| {
        if let Some(form) = state.form_mut() {
            change(form);
        }
    });
}

fn read_form<T>(editor: RwSignal<EditorState>, read: impl FnOnce(&MeasurementForm) -> T) -> Option<T> {
    editor.with(|state| state.form().map(read))
}

#[component]
pub fn MeasurementFormModal(editor: RwSignal<EditorState>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let is_edit = read_form(editor, |f| f.is_edit()).unwrap_or(false);
    let client_locked = read_form(editor, |f| f.client_locked()).unwrap_or(false);
    let title = if is_edit { "Edit measurement" } else { "New measurement" };
    let busy = Signal::derive(move || store.measurements_loading().get());

    let garment = Signal::derive(move || {
        read_form(editor, |f| f.garment_type().clone()).unwrap_or_default()
    });
    let template_names = Memo::new(move |_| {
        read_form(editor, |f| {
            f.template_values().iter().map(|row| row.name.clone()).collect::<Vec<_>>()
        })
        .unwrap_or_default()
    });
    let custom_keys = Memo::new(move |_| {
        read_form(editor, |f| f.custom_fields().iter().map(|c| c.key).collect::<Vec<_>>())
            .unwrap_or_default()
    });

    let default_unit = move || read_form(editor, |f| f.unit.clone()).unwrap_or_default();

    let close = Callback::new(move |_: ()| dispatch(editor, EditorEvent::Cancel));

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let submission = match read_form(editor, |f| f.submission()) {
            Some(Ok(submission)) => submission,
            Some(Err(e)) => {
                ctx.toasts.push(NoticeLevel::Error, e.to_string());
                return;
            }
            None => return,
        };

        let measurements = ctx.measurements();
        spawn_local(async move {
            let result = match submission {
                Submission::Create(payload) => measurements
                    .add_measurement(&payload.client_id, payload.garment_type, payload.measurements, payload.notes)
                    .await
                    .map(|_| ()),
                Submission::Update { id, patch } => measurements
                    .update_measurement(&id, &patch)
                    .await
                    .map(|_| ()),
            };
            let event = if result.is_ok() { EditorEvent::Saved } else { EditorEvent::Failed };
            dispatch(editor, event);
        });
    };

    view! {
        <Modal title=title on_close=close>
            <form class="measurement-form" on:submit=submit>
                <label class="form-row">
                    <span class="form-label">"Client"</span>
                    <select
                        class="form-select"
                        disabled=client_locked
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            with_form(editor, |f| f.set_client((!value.is_empty()).then_some(value)));
                        }
                    >
                        <option value="">"Select a client"</option>
                        <For
                            each=move || store.clients().get()
                            key=|client| client.id.clone()
                            children=move |client| {
                                let id = client.id.clone();
                                let selected_id = client.id.clone();
                                let is_selected = move || {
                                    read_form(editor, |f| f.client_id.as_deref() == Some(selected_id.as_str()))
                                        .unwrap_or(false)
                                };
                                view! {
                                    <option value=id selected=is_selected>{client.name}</option>
                                }
                            }
                        />
                    </select>
                </label>

                <div class="form-row">
                    <span class="form-label">"Garment"</span>
                    <GarmentSelector
                        current=garment
                        on_change=Callback::new(move |choice: GarmentType| {
                            with_form(editor, |f| f.select_garment(choice));
                        })
                    />
                </div>

                <label class="form-row">
                    <span class="form-label">"Default unit"</span>
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            let unit = event_target_value(&ev);
                            with_form(editor, |f| f.unit = unit);
                        }
                    >
                        {UNITS.iter().map(|unit| {
                            let unit = *unit;
                            let is_selected = move || {
                                read_form(editor, |f| f.unit == unit).unwrap_or(false)
                            };
                            view! { <option value=unit selected=is_selected>{unit}</option> }
                        }).collect_view()}
                    </select>
                </label>

                <div class="template-fields">
                    <For
                        each=move || template_names.get()
                        key=|name| name.clone()
                        children=move |name| {
                            let field = name.clone();
                            let row = move |read: fn(&TemplateRow) -> String| {
                                read_form(editor, |f| {
                                    f.template_values()
                                        .iter()
                                        .find(|row| row.name == field)
                                        .map(read)
                                        .unwrap_or_default()
                                })
                                .unwrap_or_default()
                            };
                            let value_row = row.clone();
                            let value_field = name.clone();
                            let unit_field = name.clone();
                            view! {
                                <label class="measurement-row">
                                    <span class="measurement-name">{name}</span>
                                    <input
                                        type="number"
                                        step="0.1"
                                        min="0"
                                        class="measurement-input"
                                        prop:value=move || value_row(|r| r.value.clone())
                                        on:input=move |ev| {
                                            let raw = event_target_value(&ev);
                                            with_form(editor, |f| f.set_template_value(&value_field, raw));
                                        }
                                    />
                                    <input
                                        type="text"
                                        class="unit-input"
                                        placeholder=default_unit
                                        prop:value=move || row(|r| r.unit.clone().unwrap_or_default())
                                        on:input=move |ev| {
                                            let unit = event_target_value(&ev);
                                            with_form(editor, |f| f.set_template_unit(&unit_field, &unit));
                                        }
                                    />
                                </label>
                            }
                        }
                    />
                </div>

                <div class="custom-fields">
                    <For
                        each=move || custom_keys.get()
                        key=|key| *key
                        children=move |key| {
                            let field = move |read: fn(&CustomField) -> String| {
                                read_form(editor, |f| {
                                    f.custom_fields().iter().find(|c| c.key == key).map(read).unwrap_or_default()
                                })
                                .unwrap_or_default()
                            };
                            view! {
                                <div class="measurement-row custom">
                                    <input
                                        type="text"
                                        class="custom-name-input"
                                        placeholder="Name"
                                        prop:value=move || field(|c| c.name.clone())
                                        on:input=move |ev| {
                                            let name = event_target_value(&ev);
                                            with_form(editor, |f| f.set_custom_name(key, name));
                                        }
                                    />
                                    <input
                                        type="number"
                                        step="0.1"
                                        min="0"
                                        class="measurement-input"
                                        placeholder="Size"
                                        prop:value=move || field(|c| c.value.clone())
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            with_form(editor, |f| f.set_custom_value(key, value));
                                        }
                                    />
                                    <input
                                        type="text"
                                        class="unit-input"
                                        placeholder=default_unit
                                        prop:value=move || field(|c| c.unit.clone().unwrap_or_default())
                                        on:input=move |ev| {
                                            let unit = event_target_value(&ev);
                                            with_form(editor, |f| f.set_custom_unit(key, &unit));
                                        }
                                    />
                                    <button
                                        type="button"
                                        class="delete-btn"
                                        on:click=move |_| with_form(editor, |f| f.remove_custom_field(key))
                                    >
                                        "×"
                                    </button>
                                </div>
                            }
                        }
                    />
                    <button
                        type="button"
                        class="add-field-btn"
                        on:click=move |_| with_form(editor, |f| {
                            f.add_custom_field();
                        })
                    >
                        "+ Add measurement"
                    </button>
                </div>

                <label class="form-row">
                    <span class="form-label">"Notes"</span>
                    <textarea
                        class="form-textarea"
                        rows="3"
                        prop:value=move || read_form(editor, |f| f.notes.clone()).unwrap_or_default()
                        on:input=move |ev| {
                            let notes = event_target_value(&ev);
                            with_form(editor, |f| f.notes = notes);
                        }
                    ></textarea>
                </label>

                <div class="modal-actions">
                    <button type="button" class="cancel-btn" on:click=move |_| close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="primary-btn" disabled=move || busy.get()>
                        {move || match (busy.get(), is_edit) {
                            (true, _) => "Saving...",
                            (false, true) => "Save changes",
                            (false, false) => "Add measurement",
                        }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
