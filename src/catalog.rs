use egui::Color32;

/// Closed set of question categories, used for grouping and styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCategory {
    Autonomy,
    Social,
    Reflection,
}

impl QuestionCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Autonomy => "Autonomia i Organització",
            Self::Social => "Relació Social i Treball en Equip",
            Self::Reflection => "Reflexió Personal",
        }
    }

    /// Card tint for the question screen.
    pub fn color(&self) -> Color32 {
        match self {
            Self::Autonomy => Color32::from_rgb(0xFE, 0xF3, 0xC7),
            Self::Social => Color32::from_rgb(0xCF, 0xFA, 0xFE),
            Self::Reflection => Color32::from_rgb(0xFC, 0xE7, 0xF3),
        }
    }

    /// Accent used for the category pill text.
    pub fn accent(&self) -> Color32 {
        match self {
            Self::Autonomy => Color32::from_rgb(0xD9, 0x77, 0x06),
            Self::Social => Color32::from_rgb(0x08, 0x91, 0xB2),
            Self::Reflection => Color32::from_rgb(0xDB, 0x27, 0x77),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Rating,
    Text,
}

/// One catalog entry. The catalog order defines the question sequence and ids
/// are the join keys against stored submissions, so neither may change.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub category: QuestionCategory,
    pub response_type: ResponseType,
}

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "q1",
        text: "M'esforço a fer les tasques?",
        category: QuestionCategory::Autonomy,
        response_type: ResponseType::Rating,
    },
    Question {
        id: "q2",
        text: "Em concentro i treballo quan toca?",
        category: QuestionCategory::Autonomy,
        response_type: ResponseType::Rating,
    },
    Question {
        id: "q3",
        text: "M'organitzo i sóc responsable del meu material?",
        category: QuestionCategory::Autonomy,
        response_type: ResponseType::Rating,
    },
    Question {
        id: "q4",
        text: "Em relaciono amb tots els companys?",
        category: QuestionCategory::Social,
        response_type: ResponseType::Rating,
    },
    Question {
        id: "q5",
        text: "Treballo bé en equip?",
        category: QuestionCategory::Social,
        response_type: ResponseType::Rating,
    },
    Question {
        id: "q6",
        text: "Participo en totes les activitats?",
        category: QuestionCategory::Social,
        response_type: ResponseType::Rating,
    },
    Question {
        id: "q7",
        text: "Respecto les opinions de tots els companys?",
        category: QuestionCategory::Social,
        response_type: ResponseType::Rating,
    },
    Question {
        id: "q8",
        text: "El que faig millor i és el meu punt fort...",
        category: QuestionCategory::Reflection,
        response_type: ResponseType::Text,
    },
    Question {
        id: "q9",
        text: "El que puc millorar és...",
        category: QuestionCategory::Reflection,
        response_type: ResponseType::Text,
    },
];

pub fn question_by_id(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Banding label for a 1..=4 rating, shared by the dashboard and the CSV
/// export. Out-of-band values never reach this through the checked answer
/// constructor.
pub fn rating_label(value: u8) -> &'static str {
    match value {
        1 => "Caldria millorar",
        2 => "Regular",
        3 => "Bé",
        _ => "Molt bé",
    }
}

/// Label shown under the selected option of the rating scale widget.
pub fn scale_label(value: u8) -> &'static str {
    match value {
        1 => "Caldria millorar",
        2 => "Regular",
        3 => "Bé",
        _ => "Molt bé!",
    }
}

pub fn rating_color(value: u8) -> Color32 {
    match value {
        1 => Color32::from_rgb(0xEF, 0x44, 0x44),
        2 => Color32::from_rgb(0xFB, 0x92, 0x3C),
        3 => Color32::from_rgb(0x84, 0xCC, 0x16),
        _ => Color32::from_rgb(0x16, 0xA3, 0x4A),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn question_ids_are_unique() {
        let ids: BTreeSet<&str> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn question_by_id_finds_every_catalog_entry() {
        for question in QUESTIONS {
            let found = question_by_id(question.id).expect("catalog id should resolve");
            assert_eq!(found.text, question.text);
        }
        assert!(question_by_id("missing").is_none());
    }

    #[test]
    fn rating_labels_cover_the_four_point_scale() {
        assert_eq!(rating_label(1), "Caldria millorar");
        assert_eq!(rating_label(2), "Regular");
        assert_eq!(rating_label(3), "Bé");
        assert_eq!(rating_label(4), "Molt bé");
    }
}
