use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PracticeCategory {
    Technical,
    Aptitude,
    #[serde(rename = "HR")]
    Hr,
}

impl PracticeCategory {
    pub fn name(self) -> &'static str {
        match self {
            PracticeCategory::Technical => "Technical",
            PracticeCategory::Aptitude => "Aptitude",
            PracticeCategory::Hr => "HR",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PracticeQuestion {
    pub id: u32,
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub correct_answer: &'static str,
    pub category: PracticeCategory,
}

const fn q(
    id: u32,
    category: PracticeCategory,
    question: &'static str,
    options: [&'static str; 4],
    correct_answer: &'static str,
) -> PracticeQuestion {
    PracticeQuestion {
        id,
        question,
        options,
        correct_answer,
        category,
    }
}

use PracticeCategory::{Aptitude, Hr, Technical};

#[rustfmt::skip]
pub static PRACTICE_QUESTIONS: &[PracticeQuestion] = &[
    q(1, Technical, "What is the time complexity of binary search?",
        ["O(n)", "O(log n)", "O(n²)", "O(1)"], "O(log n)"),
    q(2, Technical, "Which HTTP method is used to update a resource?",
        ["GET", "POST", "PUT", "DELETE"], "PUT"),
    q(3, Technical, "What does SQL stand for?",
        ["Structured Query Language", "Simple Query Language", "Standard Query Language", "System Query Language"],
        "Structured Query Language"),
    q(4, Hr, "In a team meeting, you disagree with a colleague's approach. What do you do?",
        ["Stay silent", "Argue publicly", "Discuss privately later", "Present alternative respectfully"],
        "Present alternative respectfully"),
    q(5, Aptitude, "What is 15% of 200?",
        ["25", "30", "35", "40"], "30"),
    q(6, Technical, "Which data structure works on a last-in, first-out basis?",
        ["Queue", "Stack", "Heap", "Linked list"], "Stack"),
    q(7, Technical, "Which HTTP status code means 'Not Found'?",
        ["200", "301", "404", "500"], "404"),
    q(8, Technical, "What is the average time complexity of a hash table lookup?",
        ["O(1)", "O(log n)", "O(n)", "O(n log n)"], "O(1)"),
    q(9, Technical, "Which SQL clause filters rows after grouping?",
        ["WHERE", "HAVING", "ORDER BY", "LIMIT"], "HAVING"),
    q(10, Technical, "Which git command creates a new branch and switches to it?",
        ["git branch -d", "git checkout -b", "git merge", "git stash"], "git checkout -b"),
    q(11, Technical, "What does a foreign key enforce?",
        ["Uniqueness", "Referential integrity", "Indexing", "Encryption"], "Referential integrity"),
    q(12, Technical, "Which sorting algorithm has the best worst-case time complexity?",
        ["Quick sort", "Bubble sort", "Merge sort", "Insertion sort"], "Merge sort"),
    q(13, Aptitude, "A train travels 120 km in 2 hours. What is its average speed?",
        ["50 km/h", "60 km/h", "70 km/h", "80 km/h"], "60 km/h"),
    q(14, Aptitude, "What is the next number in the series 2, 6, 12, 20, 30?",
        ["38", "40", "42", "44"], "42"),
    q(15, Aptitude, "If 5 workers finish a job in 12 days, how many days do 10 workers need?",
        ["4", "6", "8", "24"], "6"),
    q(16, Aptitude, "A price rises from 80 to 100. What is the percentage increase?",
        ["20%", "25%", "80%", "125%"], "25%"),
    q(17, Aptitude, "What is the probability of getting heads on a fair coin toss?",
        ["0", "1/4", "1/2", "1"], "1/2"),
    q(18, Aptitude, "Which number is prime?",
        ["21", "27", "29", "33"], "29"),
    q(19, Hr, "You are given a deadline you cannot meet. What is the best first step?",
        ["Work overnight silently", "Tell your manager early", "Submit incomplete work", "Blame the team"],
        "Tell your manager early"),
    q(20, Hr, "How should you respond to critical feedback from a reviewer?",
        ["Ignore it", "Defend every choice", "Ask questions and act on it", "Escalate to HR"],
        "Ask questions and act on it"),
    q(21, Hr, "A teammate keeps missing their commitments. What do you do first?",
        ["Report them immediately", "Talk to them privately", "Do their work", "Ignore it"],
        "Talk to them privately"),
    q(22, Hr, "What is the best way to answer 'Why should we hire you?'",
        ["Talk about salary", "Match your skills to the role", "Criticise other candidates", "Say you need a job"],
        "Match your skills to the role"),
    q(23, Hr, "You discover a bug you introduced that is already in production. What do you do?",
        ["Hide it", "Report it and help fix it", "Wait for someone else to notice", "Delete the logs"],
        "Report it and help fix it"),
    q(24, Technical, "Which of these is NOT a relational database?",
        ["PostgreSQL", "MySQL", "MongoDB", "SQLite"], "MongoDB"),
    q(25, Aptitude, "What is 3/4 expressed as a percentage?",
        ["34%", "65%", "75%", "80%"], "75%"),
];

/// Looks up a question by id.
pub fn find(id: u32) -> Option<&'static PracticeQuestion> {
    PRACTICE_QUESTIONS.iter().find(|q| q.id == id)
}

/// Questions whose category name equals `name`, ignoring ASCII case.
/// An unknown category yields an empty list.
pub fn by_category(name: &str) -> Vec<PracticeQuestion> {
    PRACTICE_QUESTIONS
        .iter()
        .filter(|q| q.category.name().eq_ignore_ascii_case(name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_bank_entries_are_well_formed() {
        let ids: HashSet<u32> = PRACTICE_QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), PRACTICE_QUESTIONS.len(), "ids must be unique");

        for q in PRACTICE_QUESTIONS {
            assert!(
                q.options.contains(&q.correct_answer),
                "question {} has an answer outside its options",
                q.id
            );
            let distinct: HashSet<&str> = q.options.iter().copied().collect();
            assert_eq!(distinct.len(), 4, "question {} repeats an option", q.id);
        }
    }

    #[test]
    fn test_find_binary_search_entry() {
        let q = find(1).unwrap();
        assert_eq!(q.correct_answer, "O(log n)");
        assert!(find(9999).is_none());
    }

    #[test]
    fn test_category_filter_ignores_case() {
        let hr = by_category("hr");
        assert!(!hr.is_empty());
        assert!(hr.iter().all(|q| q.category == PracticeCategory::Hr));
        assert_eq!(by_category("HR").len(), hr.len());
        assert_eq!(by_category("tEcHnIcAl").len(), by_category("Technical").len());
        assert!(by_category("Cooking").is_empty());
    }

    #[test]
    fn test_category_serializes_with_display_name() {
        let json = serde_json::to_value(find(4).unwrap()).unwrap();
        assert_eq!(json["category"], "HR");
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
    }
}
