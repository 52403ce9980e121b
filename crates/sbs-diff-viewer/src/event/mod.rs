mod viewer_event;

pub use viewer_event::ViewerEvent;
