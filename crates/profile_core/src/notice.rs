//! Transient toast notices with timed dismissal.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    /// Epoch ms after which the notice is dismissed.
    pub expires_at_ms: i64,
}

impl Notice {
    pub fn new(text: impl Into<String>, kind: NoticeKind, now_ms: i64, duration_ms: i64) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at_ms: now_ms + duration_ms,
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// Currently shown notices, oldest first.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drops expired notices; returns how many were dismissed.
    pub fn tick(&mut self, now_ms: i64) -> usize {
        let before = self.notices.len();
        self.notices.retain(|notice| !notice.is_expired(now_ms));
        before - self.notices.len()
    }

    pub fn active(&self) -> &[Notice] {
        &self.notices
    }
}

#[cfg(test)]
mod tests {
    use super::{Notice, NoticeBoard, NoticeKind};

    #[test]
    fn tick_dismisses_only_expired_notices() {
        let mut board = NoticeBoard::new();
        board.push(Notice::new("first", NoticeKind::Success, 0, 3_000));
        board.push(Notice::new("second", NoticeKind::Error, 1_000, 3_000));

        assert_eq!(board.tick(2_999), 0);
        assert_eq!(board.tick(3_000), 1);
        assert_eq!(board.active().len(), 1);
        assert_eq!(board.active()[0].text, "second");
    }
}
