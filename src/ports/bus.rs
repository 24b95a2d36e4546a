use crate::client::store::Notice;

pub trait NoticeHandler: Send + Sync {
    fn handle_notices(&self, notices: &[Notice]);
}

/// Fan-out for store-produced notices, so the store never knows who is
/// listening (UI log panel, stderr, test collectors).
#[derive(Default)]
pub struct NoticeBus {
    handlers: Vec<Box<dyn NoticeHandler>>,
}

impl NoticeBus {
    pub fn new() -> Self {
        NoticeBus {
            handlers: Vec::new(),
        }
    }

    pub fn register_handler(&mut self, h: Box<dyn NoticeHandler>) {
        self.handlers.push(h);
    }

    pub fn publish(&self, notices: &[Notice]) {
        if notices.is_empty() {
            return;
        }
        for handler in &self.handlers {
            handler.handle_notices(notices);
        }
    }
}

pub struct ConsoleLogger;

impl NoticeHandler for ConsoleLogger {
    fn handle_notices(&self, notices: &[Notice]) {
        for notice in notices {
            eprintln!("[ConsoleLogger] Notice: {}", notice);
        }
    }
}

// Lets the TUI feed notices straight into its event channel.
impl NoticeHandler for flume::Sender<Notice> {
    fn handle_notices(&self, notices: &[Notice]) {
        for notice in notices {
            let _ = self.send(notice.clone());
        }
    }
}
