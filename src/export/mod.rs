pub mod docx;
pub mod layout;
pub mod pdf;

use serde::{Deserialize, Serialize};

use crate::services::gemini::{GeneratedContent, Language, Syllabus, Topic};
use crate::services::labels;

/// Body of an export section: a single text block or a list of blocks.
/// Renderers normalize both shapes to a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Text(String),
    List(Vec<String>),
}

impl SectionBody {
    pub fn as_items(&self) -> &[String] {
        match self {
            Self::Text(text) => std::slice::from_ref(text),
            Self::List(items) => items.as_slice(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSection {
    pub heading: String,
    pub body: SectionBody,
}

impl ExportSection {
    pub fn text(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: SectionBody::Text(body.into()),
        }
    }

    pub fn list(heading: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            body: SectionBody::List(items),
        }
    }
}

/// The shared input contract of both renderers: a title plus ordered
/// sections. Renderers are pure functions of this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSpec {
    pub title: String,
    pub sections: Vec<ExportSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Whitespace runs in the title collapse to underscores.
pub fn download_filename(title: &str, extension: &str) -> String {
    let base: Vec<&str> = title.split_whitespace().collect();
    format!("{}.{}", base.join("_"), extension)
}

pub fn syllabus_pdf_spec(syllabus: &Syllabus, language: Language) -> DocumentSpec {
    let difficulty = labels::difficulty_label(syllabus.difficulty, language);
    DocumentSpec {
        title: format!("{}_Syllabus", syllabus.subject),
        sections: vec![
            ExportSection::list(
                labels::APP_NAME,
                vec![
                    format!("Subject: {}", syllabus.subject),
                    format!("Difficulty: {difficulty}"),
                    format!("Topics: {}", syllabus.topics.len()),
                ],
            ),
            ExportSection::list(
                "Curriculum",
                syllabus
                    .topics
                    .iter()
                    .map(|t| format!("Week {}: {}\n{}", t.week, t.title, t.description))
                    .collect(),
            ),
            ExportSection::list(
                "References",
                syllabus
                    .sources
                    .iter()
                    .map(|s| format!("{}: {}", s.university, s.title))
                    .collect(),
            ),
        ],
    }
}

pub fn syllabus_docx_spec(syllabus: &Syllabus, language: Language) -> DocumentSpec {
    let difficulty = labels::difficulty_label(syllabus.difficulty, language);
    DocumentSpec {
        title: format!("{} Syllabus", syllabus.subject),
        sections: vec![
            ExportSection::list(
                "Overview",
                vec![
                    format!("Subject: {}", syllabus.subject),
                    format!("Level: {difficulty}"),
                    format!("Weeks: {}", syllabus.topics.len()),
                ],
            ),
            ExportSection::list(
                "Weekly Schedule",
                syllabus
                    .topics
                    .iter()
                    .map(|t| format!("Week {}: {} - {}", t.week, t.title, t.description))
                    .collect(),
            ),
            ExportSection::list(
                "Sources",
                syllabus
                    .sources
                    .iter()
                    .map(|s| format!("{}: {} ({})", s.university, s.title, s.url))
                    .collect(),
            ),
        ],
    }
}

pub fn content_pdf_spec(topic: &Topic, content: &GeneratedContent) -> DocumentSpec {
    DocumentSpec {
        title: format!("{} Materials", topic.title),
        sections: vec![
            ExportSection::text("Lecture", content.lecture_note.clone()),
            ExportSection::text("Case Study", content.educational_case.clone()),
            ExportSection::list("Questions", content.questions.clone()),
            ExportSection::list(
                "Tests",
                content
                    .tests
                    .iter()
                    .map(|t| format!("{}\nCorrect: {}", t.question, t.correct_answer))
                    .collect(),
            ),
        ],
    }
}

pub fn content_docx_spec(
    topic: &Topic,
    content: &GeneratedContent,
    language: Language,
) -> DocumentSpec {
    DocumentSpec {
        title: format!("{} Lesson Materials", topic.title),
        sections: vec![
            ExportSection::text(
                labels::lecture_note_label(language),
                content.lecture_note.clone(),
            ),
            ExportSection::text(
                labels::educational_case_label(language),
                content.educational_case.clone(),
            ),
            ExportSection::text(labels::kazus_label(language), content.kazus.clone()),
            ExportSection::list(labels::questions_label(language), content.questions.clone()),
            ExportSection::list(
                labels::tests_label(language),
                content
                    .tests
                    .iter()
                    .map(|t| {
                        format!(
                            "{}\nOptions: {}\nAnswer: {}",
                            t.question,
                            t.options.join(", "),
                            t.correct_answer
                        )
                    })
                    .collect(),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gemini::{DifficultyLevel, Source, TestItem};

    fn sample_syllabus() -> Syllabus {
        Syllabus {
            subject: "Artificial Intelligence".to_string(),
            difficulty: DifficultyLevel::Intermediate,
            topics: vec![Topic {
                id: "1".to_string(),
                title: "Search".to_string(),
                description: "State-space search".to_string(),
                week: 1,
            }],
            sources: vec![Source {
                university: "MIT".to_string(),
                url: "https://mit.edu".to_string(),
                title: "6.034".to_string(),
            }],
        }
    }

    #[test]
    fn filename_collapses_whitespace_runs() {
        assert_eq!(
            download_filename("Artificial  Intelligence\tSyllabus", "pdf"),
            "Artificial_Intelligence_Syllabus.pdf"
        );
        assert_eq!(download_filename("Topic Materials", "docx"), "Topic_Materials.docx");
    }

    #[test]
    fn syllabus_pdf_spec_orders_sections() {
        let spec = syllabus_pdf_spec(&sample_syllabus(), Language::En);
        assert_eq!(spec.title, "Artificial Intelligence_Syllabus");
        let headings: Vec<&str> = spec.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Ustoz Pro", "Curriculum", "References"]);
        assert_eq!(
            spec.sections[1].body.as_items()[0],
            "Week 1: Search\nState-space search"
        );
    }

    #[test]
    fn content_docx_spec_uses_localized_headings() {
        let topic = Topic {
            id: "1".to_string(),
            title: "Search".to_string(),
            description: String::new(),
            week: 1,
        };
        let content = GeneratedContent {
            lecture_note: "note".to_string(),
            educational_case: "case".to_string(),
            kazus: "kazus".to_string(),
            questions: vec!["q1".to_string()],
            tests: vec![TestItem {
                question: "2+2?".to_string(),
                options: vec!["3".into(), "4".into(), "5".into(), "6".into()],
                correct_answer: "4".to_string(),
            }],
        };
        let spec = content_docx_spec(&topic, &content, Language::Ru);
        assert_eq!(spec.title, "Search Lesson Materials");
        assert_eq!(spec.sections[0].heading, "Текст лекции");
        assert_eq!(
            spec.sections[4].body.as_items()[0],
            "2+2?\nOptions: 3, 4, 5, 6\nAnswer: 4"
        );
    }

    #[test]
    fn single_text_body_normalizes_to_one_item() {
        let section = ExportSection::text("Lecture", "body");
        assert_eq!(section.body.as_items(), ["body".to_string()]);
    }
}
