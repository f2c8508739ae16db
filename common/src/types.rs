use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bucket plus key (or prefix) address of an object in the object store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

impl std::fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri())
    }
}

/// The five classes the classifier scores, in output-vector order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum MammogramView {
    NotMammography,
    CranialCaudalRight,
    CranialCaudalLeft,
    MedioLateralObliqueRight,
    MedioLateralObliqueLeft,
}

impl MammogramView {
    pub const COUNT: usize = 5;

    pub fn from_position(position: usize) -> Option<Self> {
        match position {
            0 => Some(Self::NotMammography),
            1 => Some(Self::CranialCaudalRight),
            2 => Some(Self::CranialCaudalLeft),
            3 => Some(Self::MedioLateralObliqueRight),
            4 => Some(Self::MedioLateralObliqueLeft),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotMammography => "not being mammography",
            Self::CranialCaudalRight => "being a Cranial-Caudal Right (CC-Right)",
            Self::CranialCaudalLeft => "being a Cranial-Caudal Left (CC-Left)",
            Self::MedioLateralObliqueRight => "being a Mediolateral-Oblique Right (MLO-Right)",
            Self::MedioLateralObliqueLeft => "being a Mediolateral-Oblique Left (MLO-Left)",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbabilityError {
    #[error("expected {expected} class probabilities, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// One probability per class, in `MammogramView` position order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClassProbabilities([f32; MammogramView::COUNT]);

impl ClassProbabilities {
    pub fn new(values: [f32; MammogramView::COUNT]) -> Self {
        Self(values)
    }

    pub fn from_slice(values: &[f32]) -> Result<Self, ProbabilityError> {
        let values: [f32; MammogramView::COUNT] =
            values
                .try_into()
                .map_err(|_| ProbabilityError::WrongLength {
                    expected: MammogramView::COUNT,
                    actual: values.len(),
                })?;
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f32; MammogramView::COUNT] {
        &self.0
    }

    /// Position of the highest probability. Scans in class order and only
    /// replaces the current best on strict improvement, so ties resolve to
    /// the lowest position.
    pub fn best_position(&self) -> usize {
        let mut best_position = 0;
        let mut best_probability = self.0[0];

        for (position, probability) in self.0.iter().enumerate().skip(1) {
            if *probability > best_probability {
                best_probability = *probability;
                best_position = position;
            }
        }

        best_position
    }

    pub fn best_prediction(&self) -> Prediction {
        let position = self.best_position();
        Prediction {
            view: MammogramView::from_position(position).unwrap_or(MammogramView::NotMammography),
            probability: self.0[position],
        }
    }
}

/// The winning class together with its probability.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Prediction {
    pub view: MammogramView,
    pub probability: f32,
}

impl Prediction {
    pub fn description(&self) -> String {
        format!(
            "Chance of {:.2}% of {}",
            self.probability * 100.0,
            self.view.label()
        )
    }
}
