use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewKind {
    General,
    Technical,
    Behavioral,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewQuestion {
    pub id: u32,
    pub question: &'static str,
    #[serde(rename = "type")]
    pub kind: InterviewKind,
}

const fn q(id: u32, question: &'static str, kind: InterviewKind) -> InterviewQuestion {
    InterviewQuestion { id, question, kind }
}

#[rustfmt::skip]
pub static INTERVIEW_QUESTIONS: &[InterviewQuestion] = &[
    q(1, "Tell me about yourself.", InterviewKind::General),
    q(2, "What are your strengths and weaknesses?", InterviewKind::General),
    q(3, "Why do you want to work for our company?", InterviewKind::General),
    q(4, "Describe a challenging project you worked on.", InterviewKind::Technical),
    q(5, "How do you handle tight deadlines?", InterviewKind::Behavioral),
    q(6, "What are your salary expectations?", InterviewKind::General),
    q(7, "Where do you see yourself in five years?", InterviewKind::General),
    q(8, "Explain a technical concept to someone without a technical background.", InterviewKind::Technical),
    q(9, "How would you debug a service that is slow only in production?", InterviewKind::Technical),
    q(10, "Tell me about a time you disagreed with your manager.", InterviewKind::Behavioral),
    q(11, "Describe a mistake you made and what you learned from it.", InterviewKind::Behavioral),
    q(12, "How do you prioritise when everything is urgent?", InterviewKind::Behavioral),
];
