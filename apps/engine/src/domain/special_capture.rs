//! Top-Cash captures: 萬萬 taking 千萬 or 百萬, and 千萬 taking 百萬.

use serde::{Deserialize, Serialize};

use crate::domain::cards_catalog::{ID_BAI_WAN, ID_QIAN_WAN, ID_WAN_WAN};
use crate::domain::cards_types::CardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialCapture {
    WanCaughtQian,
    WanCaughtBai,
    QianCaughtBai,
}

impl SpecialCapture {
    pub fn classify(by: CardId, captured: CardId) -> Option<Self> {
        match (by, captured) {
            (ID_WAN_WAN, ID_QIAN_WAN) => Some(Self::WanCaughtQian),
            (ID_WAN_WAN, ID_BAI_WAN) => Some(Self::WanCaughtBai),
            (ID_QIAN_WAN, ID_BAI_WAN) => Some(Self::QianCaughtBai),
            _ => None,
        }
    }
}

/// Which special captures happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialCaptureFlags {
    pub wan_caught_qian: bool,
    pub wan_caught_bai: bool,
    pub qian_caught_bai: bool,
}

impl SpecialCaptureFlags {
    fn slot(&mut self, kind: SpecialCapture) -> &mut bool {
        match kind {
            SpecialCapture::WanCaughtQian => &mut self.wan_caught_qian,
            SpecialCapture::WanCaughtBai => &mut self.wan_caught_bai,
            SpecialCapture::QianCaughtBai => &mut self.qian_caught_bai,
        }
    }

    pub fn set(&mut self, kind: SpecialCapture) {
        *self.slot(kind) = true;
    }

    pub fn contains(&self, kind: SpecialCapture) -> bool {
        match kind {
            SpecialCapture::WanCaughtQian => self.wan_caught_qian,
            SpecialCapture::WanCaughtBai => self.wan_caught_bai,
            SpecialCapture::QianCaughtBai => self.qian_caught_bai,
        }
    }

    pub fn any(&self) -> bool {
        self.wan_caught_qian || self.wan_caught_bai || self.qian_caught_bai
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            wan_caught_qian: self.wan_caught_qian || other.wan_caught_qian,
            wan_caught_bai: self.wan_caught_bai || other.wan_caught_bai,
            qian_caught_bai: self.qian_caught_bai || other.qian_caught_bai,
        }
    }
}
