use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the TD analysis system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Analysis errors (0-99)
    #[strum(serialize = "_TD_ERR_BEGIN")]
    TdErrBegin = 0,
    #[strum(serialize = "COMMON_ERROR")]
    CommonError = 1,
    #[strum(serialize = "SRC_DATA_NOT_FOUND")]
    SrcDataNotFound = 3,
    #[strum(serialize = "SRC_DATA_TYPE_ERR")]
    SrcDataTypeErr = 4,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 18,
    #[strum(serialize = "_TD_ERR_END")]
    TdErrEnd = 99,

    // KL data errors (200-299)
    #[strum(serialize = "_KL_ERR_BEGIN")]
    KlErrBegin = 200,
    #[strum(serialize = "KL_DATA_NOT_ALIGN")]
    KlDataNotAlign = 202,
    #[strum(serialize = "KL_DATA_INVALID")]
    KlDataInvalid = 203,
    #[strum(serialize = "KL_NOT_MONOTONOUS")]
    KlNotMonotonous = 206,
    #[strum(serialize = "NO_DATA")]
    NoData = 210,
    #[strum(serialize = "_KL_ERR_END")]
    KlErrEnd = 299,
}

impl ErrCode {
    pub fn is_kldata_err(&self) -> bool {
        let code = *self as i32;
        code > Self::KlErrBegin as i32 && code < Self::KlErrEnd as i32
    }

    pub fn is_td_err(&self) -> bool {
        let code = *self as i32;
        code > Self::TdErrBegin as i32 && code < Self::TdErrEnd as i32
    }
}

#[derive(Debug, Clone, Error)]
#[error("{errcode}: {msg}")]
pub struct TdException {
    pub errcode: ErrCode,
    pub msg: String,
}

impl TdException {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_kldata_err(&self) -> bool {
        self.errcode.is_kldata_err()
    }

    pub fn is_td_err(&self) -> bool {
        self.errcode.is_td_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_ranges() {
        assert!(ErrCode::KlNotMonotonous.is_kldata_err());
        assert!(!ErrCode::KlNotMonotonous.is_td_err());
        assert!(ErrCode::ParaError.is_td_err());
        assert!(!ErrCode::KlErrBegin.is_kldata_err());
    }

    #[test]
    fn test_display() {
        let e = TdException::new("missing required series: close", ErrCode::SrcDataNotFound);
        assert_eq!(e.to_string(), "SRC_DATA_NOT_FOUND: missing required series: close");
        assert!(!e.is_kldata_err());
    }
}
