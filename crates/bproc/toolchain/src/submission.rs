//! Program submissions and their validation.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output formats the toolchain can compile to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    Bin,
    Hex,
    HexV3,
    Vhdl,
    Vrlg,
}

impl TargetFormat {
    /// Every supported format, in the order the toolchain documents them
    pub const ALL: [TargetFormat; 5] = [
        TargetFormat::Bin,
        TargetFormat::Hex,
        TargetFormat::HexV3,
        TargetFormat::Vhdl,
        TargetFormat::Vrlg,
    ];

    /// Wire name, as accepted in the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetFormat::Bin => "bin",
            TargetFormat::Hex => "hex",
            TargetFormat::HexV3 => "hexv3",
            TargetFormat::Vhdl => "vhdl",
            TargetFormat::Vrlg => "vrlg",
        }
    }

    /// Command-line flag selecting this format
    pub fn flag(&self) -> String {
        format!("--{}", self.as_str())
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ValidationError::UnsupportedFormat(s.to_string()))
    }
}

/// Body of a verify or compile request.
///
/// `type` stays an untyped JSON value: verify never looks at it, so any
/// shape must be accepted there, and compile decides what is acceptable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSubmission {
    /// bpasm source text
    pub program: String,

    /// Requested output format (compile only)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub target_format: Option<serde_json::Value>,
}

impl ProgramSubmission {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            target_format: None,
        }
    }

    pub fn with_format(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.target_format = Some(value.into());
        self
    }

    /// Checks shared by every action that writes an artifact.
    pub fn validate_for_verify(&self) -> ValidationResult<()> {
        if self.program.is_empty() {
            return Err(ValidationError::MissingProgram);
        }
        Ok(())
    }

    /// Verify checks plus a required, supported `type`.
    pub fn validate_for_compile(&self) -> ValidationResult<TargetFormat> {
        self.validate_for_verify()?;

        match &self.target_format {
            None | Some(serde_json::Value::Null) => Err(ValidationError::MissingFormat),
            Some(serde_json::Value::String(value)) => value.parse(),
            Some(other) => Err(ValidationError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_format_round_trips_through_its_name() {
        for format in TargetFormat::ALL {
            assert_eq!(format.as_str().parse::<TargetFormat>().unwrap(), format);
        }
        assert_eq!(TargetFormat::HexV3.flag(), "--hexv3");
    }

    #[test]
    fn test_format_names_are_case_sensitive() {
        assert_eq!(
            "BIN".parse::<TargetFormat>(),
            Err(ValidationError::UnsupportedFormat("BIN".to_string()))
        );
    }

    #[test]
    fn test_empty_program_rejected() {
        let submission = ProgramSubmission::new("");
        assert_eq!(
            submission.validate_for_verify(),
            Err(ValidationError::MissingProgram)
        );
        assert_eq!(
            submission.with_format("bin").validate_for_compile(),
            Err(ValidationError::MissingProgram)
        );
    }

    #[test]
    fn test_verify_ignores_type() {
        for value in [json!("xyz"), json!(42), json!(null), json!({"a": 1})] {
            let submission = ProgramSubmission::new("NOP").with_format(value);
            assert!(submission.validate_for_verify().is_ok());
        }
        assert!(ProgramSubmission::new("NOP").validate_for_verify().is_ok());
    }

    #[test]
    fn test_compile_requires_type() {
        let submission = ProgramSubmission::new("NOP");
        assert_eq!(
            submission.validate_for_compile(),
            Err(ValidationError::MissingFormat)
        );
    }

    #[test]
    fn test_compile_rejects_unknown_type() {
        let err = ProgramSubmission::new("NOP")
            .with_format("xyz")
            .validate_for_compile()
            .unwrap_err();
        assert!(err.to_string().contains("xyz type is not allowed"));

        let err = ProgramSubmission::new("NOP")
            .with_format(7)
            .validate_for_compile()
            .unwrap_err();
        assert_eq!(err.to_string(), "7 type is not allowed");
    }

    #[test]
    fn test_compile_accepts_supported_type() {
        let format = ProgramSubmission::new("NOP")
            .with_format("vhdl")
            .validate_for_compile()
            .unwrap();
        assert_eq!(format, TargetFormat::Vhdl);
    }

    #[test]
    fn test_deserialize_renames_type() {
        let submission: ProgramSubmission =
            serde_json::from_value(json!({"program": "NOP", "type": "hex"})).unwrap();
        assert_eq!(submission.target_format, Some(json!("hex")));

        let missing = serde_json::from_value::<ProgramSubmission>(json!({"type": "hex"}));
        assert!(missing.is_err());
    }
}
