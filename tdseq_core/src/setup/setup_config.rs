use crate::common::{
    enums::SetupExtension,
    td_exception::{ErrCode, TdException},
};

/// Setup phase configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SetupConfig {
    /// bars needed to complete a setup
    pub setup_len: usize,

    /// close is compared with the close this many bars back
    pub setup_bias: usize,

    /// emit every count as it forms; otherwise only completed runs plus the open one at the end
    pub emit_partial: bool,

    /// behaviour once a run reaches `setup_len`
    pub extension: SetupExtension,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            setup_len: 9,
            setup_bias: 4,
            emit_partial: true,
            extension: SetupExtension::Reset,
        }
    }
}

impl SetupConfig {
    pub fn new(
        setup_len: Option<usize>,
        setup_bias: Option<usize>,
        emit_partial: Option<bool>,
        extension: Option<SetupExtension>,
    ) -> Result<Self, TdException> {
        let default = Self::default();
        let conf = Self {
            setup_len: setup_len.unwrap_or(default.setup_len),
            setup_bias: setup_bias.unwrap_or(default.setup_bias),
            emit_partial: emit_partial.unwrap_or(default.emit_partial),
            extension: extension.unwrap_or(default.extension),
        };
        if conf.setup_len < 2 {
            return Err(TdException::new(
                format!("setup_len={} must be at least 2", conf.setup_len),
                ErrCode::ParaError,
            ));
        }
        if conf.setup_bias == 0 {
            return Err(TdException::new("setup_bias must be positive", ErrCode::ParaError));
        }
        Ok(conf)
    }

    /// First bar index at which a flip can be evaluated
    pub fn first_flip_index(&self) -> usize {
        self.setup_bias + 1
    }
}
