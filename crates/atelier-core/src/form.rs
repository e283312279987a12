//! Measurement Form State
//!
//! Backs the create/edit modal. Template fields (from the garment's
//! template) and custom fields (free name/value pairs) are tracked apart
//! and merged into one list on submit. Every row keeps its own unit; the
//! form-level unit only fills rows that have none. Only positive numeric
//! sizes are submitted; anything else is dropped without complaint.

use thiserror::Error;

use crate::domain::{GarmentType, Measurement, MeasurementEntry, MeasurementPatch, NewMeasurement};

/// Unit applied to rows that carry none
pub const DEFAULT_UNIT: &str = "in";

/// Form-level problems that block submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please select a client")]
    MissingClient,
}

pub type FormResult<T> = Result<T, FormError>;

/// One row of the garment's template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRow {
    pub name: String,
    /// Raw input
    pub value: String,
    /// Unit kept from the record being edited, or set on the row
    pub unit: Option<String>,
}

impl TemplateRow {
    fn blank(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            unit: None,
        }
    }
}

/// A user-named measurement outside the template
#[derive(Debug, Clone, PartialEq)]
pub struct CustomField {
    /// Stable key for list rendering
    pub key: u32,
    pub name: String,
    pub value: String,
    pub unit: Option<String>,
}

/// What the form will send when submitted
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewMeasurement),
    Update { id: String, patch: MeasurementPatch },
}

#[derive(Debug, Clone, PartialEq)]
enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementForm {
    mode: FormMode,
    pub client_id: Option<String>,
    garment_type: GarmentType,
    /// Template rows in template order
    template_values: Vec<TemplateRow>,
    custom_fields: Vec<CustomField>,
    /// Default unit for rows without their own
    pub unit: String,
    pub notes: String,
    next_key: u32,
}

impl MeasurementForm {
    /// Empty create form, optionally preselecting a client
    pub fn create(client_id: Option<String>) -> Self {
        let garment_type = GarmentType::default();
        Self {
            mode: FormMode::Create,
            client_id,
            template_values: blank_template(&garment_type),
            garment_type,
            custom_fields: Vec::new(),
            unit: DEFAULT_UNIT.to_string(),
            notes: String::new(),
            next_key: 0,
        }
    }

    /// Edit form pre-populated from `record`, splitting its entries into
    /// template and custom fields
    pub fn edit(record: &Measurement) -> Self {
        let garment_type = record.garment_type.clone();
        let mut template_values = blank_template(&garment_type);
        let mut custom_fields = Vec::new();
        let mut next_key = 0;

        for entry in &record.measurements {
            match garment_type.template_field(&entry.name) {
                Some(field) => {
                    if let Some(row) = template_values.iter_mut().find(|row| row.name == field) {
                        row.value = format_size(entry.size);
                        row.unit = entry.unit.clone();
                    }
                }
                None => {
                    custom_fields.push(CustomField {
                        key: next_key,
                        name: entry.name.clone(),
                        value: format_size(entry.size),
                        unit: entry.unit.clone(),
                    });
                    next_key += 1;
                }
            }
        }

        let unit = record
            .measurements
            .iter()
            .find_map(|entry| entry.unit.clone())
            .unwrap_or_else(|| DEFAULT_UNIT.to_string());

        Self {
            mode: FormMode::Edit { id: record.id.clone() },
            client_id: Some(record.client_id.clone()),
            garment_type,
            template_values,
            custom_fields,
            unit,
            notes: record.notes.clone().unwrap_or_default(),
            next_key,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// The client cannot be changed once a record exists
    pub fn client_locked(&self) -> bool {
        self.is_edit()
    }

    pub fn record_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Edit { id } => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn garment_type(&self) -> &GarmentType {
        &self.garment_type
    }

    pub fn template_values(&self) -> &[TemplateRow] {
        &self.template_values
    }

    pub fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    pub fn set_client(&mut self, client_id: Option<String>) {
        if self.client_locked() {
            return;
        }
        self.client_id = client_id.filter(|id| !id.is_empty());
    }

    /// Swap the template field set. Rows for fields present in both
    /// templates are kept, unit included.
    pub fn select_garment(&mut self, garment_type: GarmentType) {
        if garment_type == self.garment_type {
            return;
        }
        let previous = std::mem::take(&mut self.template_values);
        self.template_values = blank_template(&garment_type)
            .into_iter()
            .map(|blank| {
                previous
                    .iter()
                    .find(|old| old.name == blank.name)
                    .cloned()
                    .unwrap_or(blank)
            })
            .collect();
        self.garment_type = garment_type;
    }

    pub fn set_template_value(&mut self, field: &str, value: impl Into<String>) {
        if let Some(row) = self.template_values.iter_mut().find(|row| row.name == field) {
            row.value = value.into();
        }
    }

    /// Blank clears the row's unit so the default applies again
    pub fn set_template_unit(&mut self, field: &str, unit: &str) {
        if let Some(row) = self.template_values.iter_mut().find(|row| row.name == field) {
            row.unit = clean_unit(unit);
        }
    }

    /// Append an empty custom field and return its key
    pub fn add_custom_field(&mut self) -> u32 {
        let key = self.next_key;
        self.next_key += 1;
        self.custom_fields.push(CustomField {
            key,
            name: String::new(),
            value: String::new(),
            unit: None,
        });
        key
    }

    pub fn set_custom_name(&mut self, key: u32, name: impl Into<String>) {
        if let Some(field) = self.custom_fields.iter_mut().find(|f| f.key == key) {
            field.name = name.into();
        }
    }

    pub fn set_custom_value(&mut self, key: u32, value: impl Into<String>) {
        if let Some(field) = self.custom_fields.iter_mut().find(|f| f.key == key) {
            field.value = value.into();
        }
    }

    pub fn set_custom_unit(&mut self, key: u32, unit: &str) {
        if let Some(field) = self.custom_fields.iter_mut().find(|f| f.key == key) {
            field.unit = clean_unit(unit);
        }
    }

    pub fn remove_custom_field(&mut self, key: u32) {
        self.custom_fields.retain(|f| f.key != key);
    }

    /// Unit a row is submitted with
    pub fn unit_for(&self, row_unit: Option<&str>) -> Option<String> {
        row_unit.map(str::to_string).or_else(|| clean_unit(&self.unit))
    }

    /// Template entries then custom entries, keeping only positive sizes
    pub fn collect_measurements(&self) -> Vec<MeasurementEntry> {
        let template = self
            .template_values
            .iter()
            .map(|row| (row.name.as_str(), row.value.as_str(), row.unit.as_deref()));
        let custom = self
            .custom_fields
            .iter()
            .map(|field| (field.name.trim(), field.value.as_str(), field.unit.as_deref()))
            .filter(|(name, _, _)| !name.is_empty());

        template
            .chain(custom)
            .filter_map(|(name, raw, unit)| {
                parse_size(raw).map(|size| MeasurementEntry {
                    name: name.to_string(),
                    size,
                    unit: self.unit_for(unit),
                })
            })
            .collect()
    }

    fn notes_value(&self) -> Option<String> {
        let notes = self.notes.trim();
        (!notes.is_empty()).then(|| notes.to_string())
    }

    /// Build the request for the current mode
    pub fn submission(&self) -> FormResult<Submission> {
        match &self.mode {
            FormMode::Create => {
                let client_id = self.client_id.clone().ok_or(FormError::MissingClient)?;
                Ok(Submission::Create(NewMeasurement {
                    client_id,
                    garment_type: self.garment_type.clone(),
                    measurements: self.collect_measurements(),
                    notes: self.notes_value(),
                }))
            }
            FormMode::Edit { id } => Ok(Submission::Update {
                id: id.clone(),
                // Cleared notes go out as "" so the server drops the old text
                patch: MeasurementPatch {
                    garment_type: Some(self.garment_type.clone()),
                    measurements: Some(self.collect_measurements()),
                    notes: Some(self.notes.trim().to_string()),
                },
            }),
        }
    }
}

fn blank_template(garment_type: &GarmentType) -> Vec<TemplateRow> {
    garment_type.template().iter().map(|field| TemplateRow::blank(field)).collect()
}

fn clean_unit(unit: &str) -> Option<String> {
    let unit = unit.trim();
    (!unit.is_empty()).then(|| unit.to_string())
}

/// Positive finite number, or nothing
pub fn parse_size(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|size| size.is_finite() && *size > 0.0)
}

fn format_size(size: f64) -> String {
    size.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dress_record() -> Measurement {
        Measurement {
            id: "m1".to_string(),
            user_id: "u1".to_string(),
            client_id: "c1".to_string(),
            garment_type: GarmentType::Dress,
            measurements: vec![
                MeasurementEntry::new("Bust", 34.0).with_unit("cm"),
                MeasurementEntry::new("waist", 28.5).with_unit("cm"),
                MeasurementEntry::new("Back Width", 15.0).with_unit("cm"),
            ],
            notes: Some("Evening gown".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_only_positive_numbers_are_submitted() {
        let mut form = MeasurementForm::create(Some("c1".to_string()));
        form.select_garment(GarmentType::Dress);
        form.set_template_value("Waist", "32");
        form.set_template_value("Hips", "0");
        form.set_template_value("Bust", "abc");

        let entries = form.collect_measurements();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Waist");
        assert_eq!(entries[0].size, 32.0);
    }

    #[test]
    fn test_blank_negative_and_nan_are_dropped() {
        for raw in ["", "  ", "-4", "NaN", "inf", "0.0"] {
            assert_eq!(parse_size(raw), None, "{:?} should be dropped", raw);
        }
        assert_eq!(parse_size(" 12.25 "), Some(12.25));
    }

    #[test]
    fn test_custom_fields_merge_after_template() {
        let mut form = MeasurementForm::create(Some("c1".to_string()));
        form.select_garment(GarmentType::Skirt);
        form.set_template_value("Waist", "30");
        let key = form.add_custom_field();
        form.set_custom_name(key, "  Hem Width ");
        form.set_custom_value(key, "60");
        let unnamed = form.add_custom_field();
        form.set_custom_value(unnamed, "10");

        let names: Vec<String> = form.collect_measurements().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Waist", "Hem Width"]);
    }

    #[test]
    fn test_switching_garment_carries_shared_fields() {
        let mut form = MeasurementForm::create(None);
        form.select_garment(GarmentType::Suit);
        form.set_template_value("Waist", "32");
        form.set_template_value("Inseam", "30");

        form.set_template_unit("Waist", "cm");

        form.select_garment(GarmentType::Skirt);
        let values = form.template_values();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].name, "Waist");
        assert_eq!(values[0].value, "32");
        assert_eq!(values[0].unit.as_deref(), Some("cm"));
        assert!(values.iter().all(|row| row.name != "Inseam"));
    }

    #[test]
    fn test_edit_splits_template_and_custom() {
        let form = MeasurementForm::edit(&dress_record());

        assert!(form.client_locked());
        assert_eq!(form.record_id(), Some("m1"));
        assert_eq!(form.unit, "cm");
        assert_eq!(form.notes, "Evening gown");
        assert_eq!(form.template_values()[0].name, "Bust");
        assert_eq!(form.template_values()[0].value, "34");
        assert_eq!(form.template_values()[1].name, "Waist");
        assert_eq!(form.template_values()[1].value, "28.5");
        assert_eq!(form.template_values()[1].unit.as_deref(), Some("cm"));
        assert_eq!(form.custom_fields().len(), 1);
        assert_eq!(form.custom_fields()[0].name, "Back Width");
    }

    fn patch_of(form: &MeasurementForm) -> MeasurementPatch {
        match form.submission().unwrap() {
            Submission::Update { patch, .. } => patch,
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_submission_is_a_patch_without_client() {
        let mut form = MeasurementForm::edit(&dress_record());
        form.set_client(Some("someone-else".to_string()));

        match form.submission().unwrap() {
            Submission::Update { id, patch } => {
                assert_eq!(id, "m1");
                assert_eq!(patch.garment_type, Some(GarmentType::Dress));
                assert_eq!(patch.measurements.as_ref().map(Vec::len), Some(3));
            }
            other => panic!("expected update, got {:?}", other),
        }
        assert_eq!(form.client_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_untouched_edit_resubmits_original_entries() {
        let record = Measurement {
            garment_type: GarmentType::Skirt,
            measurements: vec![
                MeasurementEntry::new("Waist", 76.0).with_unit("cm"),
                MeasurementEntry::new("Hips", 40.0).with_unit("in"),
                MeasurementEntry::new("Hem Width", 60.0).with_unit("cm"),
            ],
            notes: Some("Old note".to_string()),
            ..dress_record()
        };

        let patch = patch_of(&MeasurementForm::edit(&record));
        assert_eq!(patch.measurements, Some(record.measurements.clone()));
        assert_eq!(patch.notes.as_deref(), Some("Old note"));
    }

    #[test]
    fn test_edited_value_keeps_its_row_unit() {
        let record = Measurement {
            garment_type: GarmentType::Skirt,
            measurements: vec![
                MeasurementEntry::new("Waist", 76.0).with_unit("cm"),
                MeasurementEntry::new("Hips", 40.0).with_unit("in"),
            ],
            ..dress_record()
        };
        let mut form = MeasurementForm::edit(&record);
        form.set_template_value("Hips", "41");
        form.set_template_value("Skirt Length", "55");

        let entries = patch_of(&form).measurements.unwrap();
        assert_eq!(entries[0], MeasurementEntry::new("Waist", 76.0).with_unit("cm"));
        assert_eq!(entries[1], MeasurementEntry::new("Hips", 41.0).with_unit("in"));
        // New row falls back to the form unit, taken from the first entry
        assert_eq!(entries[2], MeasurementEntry::new("Skirt Length", 55.0).with_unit("cm"));
    }

    #[test]
    fn test_cleared_notes_are_sent_empty() {
        let mut form = MeasurementForm::edit(&dress_record());
        form.notes = "  ".to_string();

        let patch = patch_of(&form);
        assert_eq!(patch.notes.as_deref(), Some(""));
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["notes"], serde_json::json!(""));
    }

    #[test]
    fn test_create_requires_client() {
        let form = MeasurementForm::create(None);
        assert_eq!(form.submission(), Err(FormError::MissingClient));
    }

    #[test]
    fn test_default_unit_fills_rows_without_one() {
        let mut form = MeasurementForm::create(Some("c1".to_string()));
        form.unit = "cm".to_string();
        form.set_template_value("Chest", "100");
        match form.submission().unwrap() {
            Submission::Create(payload) => {
                assert_eq!(payload.client_id, "c1");
                assert_eq!(payload.measurements[0].unit.as_deref(), Some("cm"));
            }
            other => panic!("expected create, got {:?}", other),
        }
    }
}
