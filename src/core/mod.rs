mod session;

pub use session::{
    ContentRequest, ContentTab, ExportJob, ExportKind, PendingExport, Session, SessionSnapshot,
    SyllabusForm, SyllabusRequest, SyllabusSnapshot, TransitionError, ViewState,
};
