use std::collections::HashMap;

use crate::metrics::class_ap::Label;

/// Label-to-name lookup exposed by a dataset generator.
pub trait LabelNames {
    fn label_to_name(&self, label: Label) -> String;
}

// Unknown labels fall back to their number so reports never fail on a name.

impl LabelNames for [String] {
    fn label_to_name(&self, label: Label) -> String {
        self.get(label).cloned().unwrap_or_else(|| label.to_string())
    }
}

impl LabelNames for Vec<String> {
    fn label_to_name(&self, label: Label) -> String {
        self.as_slice().label_to_name(label)
    }
}

impl LabelNames for HashMap<Label, String> {
    fn label_to_name(&self, label: Label) -> String {
        self.get(&label).cloned().unwrap_or_else(|| label.to_string())
    }
}

impl<T: LabelNames + ?Sized> LabelNames for &T {
    fn label_to_name(&self, label: Label) -> String {
        (**self).label_to_name(label)
    }
}
