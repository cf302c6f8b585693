use crate::core::normalize::Normalizer;
use crate::models::{Detection, FusedDetection};
use std::collections::HashMap;

/// Deduplicated label set produced by fusing the outputs of any number of
/// detectors.
///
/// Invariants: at most one entry per canonical label, and the kept entry has
/// the maximum confidence observed for that label across all inputs. Labels
/// iterate in insertion order of first sighting, not confidence order.
#[derive(Debug, Clone, Default)]
pub struct FusedDetectionSet {
    order: Vec<String>,
    entries: HashMap<String, FusedDetection>,
}

impl FusedDetectionSet {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Canonical labels in first-seen order
    pub fn labels(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, label: &str) -> Option<&FusedDetection> {
        self.entries.get(label)
    }

    /// Iterate entries in first-seen label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FusedDetection)> {
        self.order
            .iter()
            .map(move |label| (label.as_str(), &self.entries[label]))
    }

    /// Flatten back into a detection list (first-seen order), e.g. to re-fuse
    /// or to feed an annotation pass
    pub fn into_detections(self) -> Vec<Detection> {
        let entries = self.entries;
        self.order
            .into_iter()
            .map(|label| {
                let kept = entries[&label];
                Detection {
                    label,
                    confidence: kept.confidence,
                    bounding_box: kept.bounding_box,
                }
            })
            .collect()
    }

    fn observe(&mut self, label: String, confidence: f64, bounding_box: [f64; 4]) {
        match self.entries.get_mut(&label) {
            Some(existing) => {
                // Strictly greater wins; exact ties keep the first-encountered
                if confidence > existing.confidence {
                    existing.confidence = confidence;
                    existing.bounding_box = bounding_box;
                }
            }
            None => {
                self.order.push(label.clone());
                self.entries.insert(
                    label,
                    FusedDetection {
                        confidence,
                        bounding_box,
                    },
                );
            }
        }
    }
}

/// Merge detections from multiple detectors into one set, canonicalizing each
/// label before fusion so near-duplicate detector vocabularies collapse onto
/// one entry. Empty input yields an empty set.
pub fn fuse(normalizer: &Normalizer, detection_lists: &[Vec<Detection>]) -> FusedDetectionSet {
    let mut fused = FusedDetectionSet::default();

    for list in detection_lists {
        for detection in list {
            let label = normalizer.normalize(&detection.label);
            if label.is_empty() {
                continue;
            }
            fused.observe(label, detection.confidence, detection.bounding_box);
        }
    }

    fused
}
