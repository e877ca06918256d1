use crate::services::gemini::{DifficultyLevel, Language};

/// Product name stamped on exported documents.
pub const APP_NAME: &str = "Ustoz Pro";

/// Difficulty wording embedded in generation prompts, in the language
/// the materials are requested in.
pub fn difficulty_description(difficulty: DifficultyLevel, language: Language) -> &'static str {
    match (language, difficulty) {
        (Language::Uz, DifficultyLevel::Beginner) => {
            "Boshlang'ich daraja (asosiy tushunchalar, sodda tushuntirishlar)"
        }
        (Language::Uz, DifficultyLevel::Intermediate) => {
            "O'rta daraja (chuqurroq tahlil, amaliy qo'llanilishi)"
        }
        (Language::Uz, DifficultyLevel::Advanced) => {
            "Yuqori daraja (murakkab nazariyalar, ilmiy tadqiqot elementlari, professional darajadagi tahlil)"
        }
        (Language::En, DifficultyLevel::Beginner) => {
            "Beginner level (basic concepts, simple explanations)"
        }
        (Language::En, DifficultyLevel::Intermediate) => {
            "Intermediate level (deeper analysis, practical application)"
        }
        (Language::En, DifficultyLevel::Advanced) => {
            "Advanced level (complex theories, scientific research elements, professional analysis)"
        }
        (Language::Ru, DifficultyLevel::Beginner) => {
            "Начальный уровень (базовые понятия, простые объяснения)"
        }
        (Language::Ru, DifficultyLevel::Intermediate) => {
            "Средний уровень (более глубокий анализ, практическое применение)"
        }
        (Language::Ru, DifficultyLevel::Advanced) => {
            "Продвинутый уровень (сложные теории, элементы научных исследований, профессиональный анализ)"
        }
    }
}

/// Short difficulty badge, used on exported overview sections.
pub fn difficulty_label(difficulty: DifficultyLevel, language: Language) -> &'static str {
    match (language, difficulty) {
        (Language::Uz, DifficultyLevel::Beginner) => "Boshlang'ich",
        (Language::Uz, DifficultyLevel::Intermediate) => "O'rta",
        (Language::Uz, DifficultyLevel::Advanced) => "Yuqori",
        (Language::En, DifficultyLevel::Beginner) => "Beginner",
        (Language::En, DifficultyLevel::Intermediate) => "Intermediate",
        (Language::En, DifficultyLevel::Advanced) => "Advanced",
        (Language::Ru, DifficultyLevel::Beginner) => "Начальный",
        (Language::Ru, DifficultyLevel::Intermediate) => "Средний",
        (Language::Ru, DifficultyLevel::Advanced) => "Продвинутый",
    }
}

/// Natural-language name requested from the generation backend.
pub fn language_name(language: Language) -> &'static str {
    match language {
        Language::Uz => "Uzbek",
        Language::En => "English",
        Language::Ru => "Russian",
    }
}

pub fn lecture_note_label(language: Language) -> &'static str {
    match language {
        Language::Uz => "Ma'ruza Matni",
        Language::En => "Lecture Notes",
        Language::Ru => "Текст лекции",
    }
}

pub fn educational_case_label(language: Language) -> &'static str {
    match language {
        Language::Uz => "Educational Case",
        Language::En => "Educational Case",
        Language::Ru => "Учебный кейс",
    }
}

pub fn kazus_label(language: Language) -> &'static str {
    match language {
        Language::Uz => "Kazus",
        Language::En => "Case Study",
        Language::Ru => "Казус (ситуация)",
    }
}

pub fn questions_label(language: Language) -> &'static str {
    match language {
        Language::Uz => "20+ Savollar",
        Language::En => "20+ Questions",
        Language::Ru => "20+ Вопросов",
    }
}

pub fn tests_label(language: Language) -> &'static str {
    match language {
        Language::Uz => "30+ Testlar",
        Language::En => "30+ Tests",
        Language::Ru => "30+ Тестов",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_a_difficulty_description() {
        for language in [Language::Uz, Language::En, Language::Ru] {
            for difficulty in [
                DifficultyLevel::Beginner,
                DifficultyLevel::Intermediate,
                DifficultyLevel::Advanced,
            ] {
                assert!(!difficulty_description(difficulty, language).is_empty());
                assert!(!difficulty_label(difficulty, language).is_empty());
            }
        }
    }

    #[test]
    fn language_names_match_prompt_expectations() {
        assert_eq!(language_name(Language::En), "English");
        assert_eq!(language_name(Language::Ru), "Russian");
        assert_eq!(language_name(Language::Uz), "Uzbek");
    }
}
