use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::{self, DocumentFormat, DocumentSpec};
use crate::services::gemini::{DifficultyLevel, GeneratedContent, Language, Source, Syllabus, Topic};

const DEFAULT_TOPIC_COUNT: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewState {
    Dashboard,
    CreateSyllabus,
    ViewSyllabus,
    GeneratingContent,
    ContentViewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentTab {
    Lecture,
    Case,
    Kazus,
    Questions,
    Tests,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportKind {
    SyllabusPdf,
    SyllabusDocx,
    ContentPdf,
    ContentDocx,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingExport {
    pub kind: ExportKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusForm {
    pub subject: String,
    pub topic_count: u32,
    pub difficulty: DifficultyLevel,
}

impl Default for SyllabusForm {
    fn default() -> Self {
        Self {
            subject: String::new(),
            topic_count: DEFAULT_TOPIC_COUNT,
            difficulty: DifficultyLevel::Intermediate,
        }
    }
}

/// Parameters for an outstanding syllabus generation call, captured at
/// the moment the transition was accepted.
#[derive(Debug, Clone)]
pub struct SyllabusRequest {
    pub subject: String,
    pub topic_count: u32,
    pub difficulty: DifficultyLevel,
    pub language: Language,
}

#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub topic_title: String,
    pub subject: String,
    pub difficulty: DifficultyLevel,
    pub language: Language,
}

/// A confirmed export, ready to render. The document spec is fully
/// assembled so rendering needs no further access to the session.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub format: DocumentFormat,
    pub spec: DocumentSpec,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("subject must not be empty")]
    EmptySubject,
    #[error("a generation request is already in flight")]
    GenerationInFlight,
    #[error("no syllabus has been generated yet")]
    NoSyllabus,
    #[error("topic not found in the active syllabus")]
    UnknownTopic,
    #[error("no generated content to show")]
    NoContent,
    #[error("reorder indices out of range")]
    InvalidReorder,
    #[error("no export awaiting confirmation")]
    NoPendingExport,
    #[error("{0} is not available from the current view")]
    Unavailable(&'static str),
}

/// The single state container behind the whole UI. Transition methods
/// are the only mutators; everything else sees read-only snapshots.
#[derive(Debug)]
pub struct Session {
    language: Language,
    view: ViewState,
    loading: bool,
    form: SyllabusForm,
    syllabus: Option<Syllabus>,
    selected_topic: Option<Topic>,
    content: Option<GeneratedContent>,
    active_tab: ContentTab,
    search_query: String,
    pending_export: Option<PendingExport>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            language: Language::Uz,
            view: ViewState::Dashboard,
            loading: false,
            form: SyllabusForm::default(),
            syllabus: None,
            selected_topic: None,
            content: None,
            active_tab: ContentTab::Lecture,
            search_query: String::new(),
            pending_export: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn select_tab(&mut self, tab: ContentTab) -> Result<(), TransitionError> {
        if self.view != ViewState::ContentViewer {
            return Err(TransitionError::Unavailable("content tabs"));
        }
        self.active_tab = tab;
        Ok(())
    }

    /// Explicit navigation. `GeneratingContent` is unreachable by
    /// navigation; data-bearing views re-check their invariants.
    pub fn navigate(&mut self, target: ViewState) -> Result<(), TransitionError> {
        match target {
            ViewState::Dashboard | ViewState::CreateSyllabus => {
                self.view = target;
                Ok(())
            }
            ViewState::ViewSyllabus => {
                if self.syllabus.is_none() {
                    return Err(TransitionError::NoSyllabus);
                }
                self.view = target;
                Ok(())
            }
            ViewState::ContentViewer => {
                if self.selected_topic.is_none() || self.content.is_none() {
                    return Err(TransitionError::NoContent);
                }
                self.view = target;
                Ok(())
            }
            ViewState::GeneratingContent => Err(TransitionError::Unavailable("this view")),
        }
    }

    pub fn begin_syllabus_generation(
        &mut self,
        subject: &str,
        topic_count: u32,
        difficulty: DifficultyLevel,
    ) -> Result<SyllabusRequest, TransitionError> {
        if self.view != ViewState::CreateSyllabus {
            return Err(TransitionError::Unavailable("syllabus generation"));
        }
        if self.loading {
            return Err(TransitionError::GenerationInFlight);
        }
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(TransitionError::EmptySubject);
        }

        self.form = SyllabusForm {
            subject: subject.to_string(),
            topic_count,
            difficulty,
        };
        self.loading = true;

        Ok(SyllabusRequest {
            subject: subject.to_string(),
            topic_count,
            difficulty,
            language: self.language,
        })
    }

    /// Applies a successful generation outcome. A result arriving after
    /// the loading flag was cleared is stale and dropped.
    pub fn syllabus_generated(&mut self, syllabus: Syllabus) {
        if !self.loading {
            return;
        }
        self.loading = false;
        self.syllabus = Some(syllabus);
        self.selected_topic = None;
        self.content = None;
        self.search_query.clear();
        self.view = ViewState::ViewSyllabus;
    }

    pub fn syllabus_generation_failed(&mut self) {
        // Stay on the form; the handler surfaces the error.
        self.loading = false;
    }

    pub fn begin_content_generation(
        &mut self,
        topic_id: &str,
    ) -> Result<ContentRequest, TransitionError> {
        if self.view != ViewState::ViewSyllabus {
            return Err(TransitionError::Unavailable("content generation"));
        }
        if self.loading {
            return Err(TransitionError::GenerationInFlight);
        }
        let syllabus = self.syllabus.as_ref().ok_or(TransitionError::NoSyllabus)?;
        let topic = syllabus
            .topics
            .iter()
            .find(|t| t.id == topic_id)
            .cloned()
            .ok_or(TransitionError::UnknownTopic)?;

        let request = ContentRequest {
            topic_title: topic.title.clone(),
            subject: syllabus.subject.clone(),
            difficulty: syllabus.difficulty,
            language: self.language,
        };

        self.selected_topic = Some(topic);
        self.view = ViewState::GeneratingContent;
        Ok(request)
    }

    /// `GeneratingContent` is itself the loading indicator for content
    /// requests; a result arriving after the view moved on is stale.
    pub fn content_generated(&mut self, content: GeneratedContent) {
        if self.view != ViewState::GeneratingContent {
            return;
        }
        self.content = Some(content);
        self.active_tab = ContentTab::Lecture;
        self.view = ViewState::ContentViewer;
    }

    pub fn content_generation_failed(&mut self) {
        if self.view != ViewState::GeneratingContent {
            return;
        }
        self.selected_topic = None;
        self.content = None;
        self.view = ViewState::ViewSyllabus;
    }

    /// Direct reorder of the presentation sequence. Week numbers keep
    /// their generation-time values.
    pub fn reorder_topics(&mut self, from: usize, to: usize) -> Result<(), TransitionError> {
        if self.view != ViewState::ViewSyllabus {
            return Err(TransitionError::Unavailable("topic reordering"));
        }
        let syllabus = self.syllabus.as_mut().ok_or(TransitionError::NoSyllabus)?;
        let len = syllabus.topics.len();
        if from >= len || to >= len {
            return Err(TransitionError::InvalidReorder);
        }
        if from != to {
            let topic = syllabus.topics.remove(from);
            syllabus.topics.insert(to, topic);
        }
        Ok(())
    }

    pub fn request_export(&mut self, kind: ExportKind) -> Result<String, TransitionError> {
        let message = match kind {
            ExportKind::SyllabusPdf | ExportKind::SyllabusDocx => {
                if self.view != ViewState::ViewSyllabus {
                    return Err(TransitionError::Unavailable("syllabus export"));
                }
                let syllabus = self.syllabus.as_ref().ok_or(TransitionError::NoSyllabus)?;
                match kind {
                    ExportKind::SyllabusPdf => {
                        format!("Confirm PDF download for {}?", syllabus.subject)
                    }
                    _ => format!("Confirm Word (DOCX) download for {}?", syllabus.subject),
                }
            }
            ExportKind::ContentPdf | ExportKind::ContentDocx => {
                if self.view != ViewState::ContentViewer {
                    return Err(TransitionError::Unavailable("content export"));
                }
                let topic = self
                    .selected_topic
                    .as_ref()
                    .ok_or(TransitionError::NoContent)?;
                match kind {
                    ExportKind::ContentPdf => {
                        format!("Confirm PDF download for {}?", topic.title)
                    }
                    _ => format!("Confirm Word (DOCX) download for {}?", topic.title),
                }
            }
        };

        self.pending_export = Some(PendingExport {
            kind,
            message: message.clone(),
        });
        Ok(message)
    }

    /// Runs the deferred action: consumes the pending export and
    /// assembles the document spec for it.
    pub fn confirm_export(&mut self) -> Result<ExportJob, TransitionError> {
        let pending = self
            .pending_export
            .take()
            .ok_or(TransitionError::NoPendingExport)?;

        match pending.kind {
            ExportKind::SyllabusPdf => {
                let syllabus = self.syllabus.as_ref().ok_or(TransitionError::NoSyllabus)?;
                Ok(ExportJob {
                    format: DocumentFormat::Pdf,
                    spec: export::syllabus_pdf_spec(syllabus, self.language),
                })
            }
            ExportKind::SyllabusDocx => {
                let syllabus = self.syllabus.as_ref().ok_or(TransitionError::NoSyllabus)?;
                Ok(ExportJob {
                    format: DocumentFormat::Docx,
                    spec: export::syllabus_docx_spec(syllabus, self.language),
                })
            }
            ExportKind::ContentPdf => {
                let (topic, content) = self.topic_and_content()?;
                Ok(ExportJob {
                    format: DocumentFormat::Pdf,
                    spec: export::content_pdf_spec(topic, content),
                })
            }
            ExportKind::ContentDocx => {
                let (topic, content) = self.topic_and_content()?;
                Ok(ExportJob {
                    format: DocumentFormat::Docx,
                    spec: export::content_docx_spec(topic, content, self.language),
                })
            }
        }
    }

    /// Declining discards the pending action with no other effect.
    pub fn decline_export(&mut self) {
        self.pending_export = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            language: self.language,
            view: self.view,
            loading: self.loading,
            form: self.form.clone(),
            syllabus: self.syllabus.as_ref().map(|s| SyllabusSnapshot {
                subject: s.subject.clone(),
                difficulty: s.difficulty,
                topics: filter_topics(&s.topics, &self.search_query),
                sources: s.sources.clone(),
                total_topics: s.topics.len(),
            }),
            search_query: self.search_query.clone(),
            selected_topic: self.selected_topic.clone(),
            content: self.content.clone(),
            active_tab: self.active_tab,
            pending_export: self.pending_export.clone(),
        }
    }

    fn topic_and_content(&self) -> Result<(&Topic, &GeneratedContent), TransitionError> {
        let topic = self
            .selected_topic
            .as_ref()
            .ok_or(TransitionError::NoContent)?;
        let content = self.content.as_ref().ok_or(TransitionError::NoContent)?;
        Ok((topic, content))
    }
}

fn filter_topics(topics: &[Topic], query: &str) -> Vec<Topic> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return topics.to_vec();
    }
    topics
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&query)
                || t.description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub language: Language,
    pub view: ViewState,
    pub loading: bool,
    pub form: SyllabusForm,
    pub syllabus: Option<SyllabusSnapshot>,
    pub search_query: String,
    pub selected_topic: Option<Topic>,
    pub content: Option<GeneratedContent>,
    pub active_tab: ContentTab,
    pub pending_export: Option<PendingExport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusSnapshot {
    pub subject: String,
    pub difficulty: DifficultyLevel,
    pub topics: Vec<Topic>,
    pub sources: Vec<Source>,
    pub total_topics: usize,
}
