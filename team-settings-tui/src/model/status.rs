//! 状态栏消息

use crate::backend::StatusLevel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub level: StatusLevel,
    pub text: String,
}
