//! Floating WeChat contact panel.
//!
//! Independent of the order flow. Besides whether the panel is open it only
//! carries static contact data.

/// A support agent reachable on WeChat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactAgent {
    pub name: &'static str,
    pub wechat_id: &'static str,
    /// QR code image; `None` shows a placeholder.
    pub qr_ref: Option<&'static str>,
}

pub const CONTACT_AGENTS: [ContactAgent; 2] = [
    ContactAgent {
        name: "김당장 매니저",
        wechat_id: "kim_manager_id",
        qr_ref: Some("/qr.png"),
    },
    ContactAgent {
        name: "이담당 매니저",
        wechat_id: "lee_manager_id",
        qr_ref: None,
    },
];

/// Support hours, Korea Standard Time.
pub const SERVICE_HOURS: &str = "09:00 - 24:00 (KST)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactWidget {
    open: bool,
}

impl ContactWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn agents(&self) -> &'static [ContactAgent] {
        &CONTACT_AGENTS
    }

    pub fn service_hours(&self) -> &'static str {
        SERVICE_HOURS
    }

    /// Flip the panel and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        tracing::debug!("Contact panel {}", if self.open { "opened" } else { "closed" });
        self.open
    }
}
