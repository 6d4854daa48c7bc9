use serde::Serialize;

pub const ONLINE_TEXT: &str = "線上";
pub const OFFLINE_TEXT: &str = "離線";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub online: bool,
    pub text: &'static str,
    pub class_name: &'static str,
}

impl Status {
    pub fn new(online: bool) -> Self {
        let (text, class_name) = status_text(online);
        Self {
            online,
            text,
            class_name,
        }
    }
}

pub fn status_text(online: bool) -> (&'static str, &'static str) {
    if online {
        (ONLINE_TEXT, "dot-online")
    } else {
        (OFFLINE_TEXT, "dot-offline")
    }
}
