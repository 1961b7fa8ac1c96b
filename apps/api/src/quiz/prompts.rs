// Prompt constants for practice quiz generation.

/// Options requested (and required) per question.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Quiz generation prompt template. Replace `{topic}` before sending.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Based on the topic of {topic} in the context of Engineering, create a multiple-choice quiz with 10 questions. Please format the response only in JSON (no extra things) with the following structure:
{
  "title": "MCQ Quiz on {topic}",
  "questions": [
    {
      "question": "Question text here",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": "Correct answer text here"
    },
    {
      "question": "Next question text here",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": "Correct answer text here"
    }
  ]
}
Make sure that:
- Strictly Do not include any preamble.
- There are exactly 10 questions.
- Each question has 4 distinct answer options.
- Provide the correct answer for each question under "correctAnswer", copied exactly from one of its options.
"#;
