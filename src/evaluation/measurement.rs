use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One named score, such as `kappa` or `precision_class_1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The value, unless it is NaN or infinite.
    pub fn defined(&self) -> Option<f64> {
        self.value.is_finite().then_some(self.value)
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.defined() {
            Some(v) => write!(f, "{}: {v:.4}", self.name),
            None => write!(f, "{}: N/A", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_values_print_as_not_available() {
        assert_eq!(Measurement::new("kappa", 0.41234).to_string(), "kappa: 0.4123");
        let nan = Measurement::new("kappa_m", f64::NAN);
        assert_eq!(nan.defined(), None);
        assert_eq!(nan.to_string(), "kappa_m: N/A");
    }
}
