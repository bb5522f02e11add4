use crate::models::{AppState, QuizQuestion};

const NUM_OPTIONS: usize = 4;

/// State for one play-through of a generated quiz.
pub struct App {
    pub state: AppState,
    questions: Vec<QuizQuestion>,
    current_question_index: usize,
    selected_option: usize,
    answers: Vec<Option<usize>>,
    result_scroll: usize,
}

impl App {
    /// Start a session over an already-generated batch of questions.
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let num_questions = questions.len();

        Self {
            state: AppState::Welcome,
            questions,
            current_question_index: 0,
            selected_option: 0,
            answers: vec![None; num_questions],
            result_scroll: 0,
        }
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current_question_index]
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn select_next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    pub fn start_quiz(&mut self) {
        self.state = if self.questions.is_empty() {
            AppState::Result
        } else {
            AppState::Quiz
        };
    }

    pub fn submit_answer(&mut self) {
        self.answers[self.current_question_index] = Some(self.selected_option);
        self.current_question_index += 1;
        self.selected_option = 0;

        if self.current_question_index >= self.questions.len() {
            self.state = AppState::Result;
        }
    }

    pub fn calculate_score(&self) -> usize {
        self.answers
            .iter()
            .zip(self.questions.iter())
            .filter(|(answer, question)| *answer == &Some(question.correct_answer))
            .count()
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.questions.len() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.current_question_index = 0;
        self.selected_option = 0;
        self.answers = vec![None; self.questions.len()];
        self.result_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn question(correct_answer: usize) -> QuizQuestion {
        QuizQuestion {
            id: Uuid::new_v4(),
            question: "pergunta".to_string(),
            options: [
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ],
            correct_answer,
            explanation: "explicação".to_string(),
            difficulty: "fácil".to_string(),
            topic: "Rust".to_string(),
        }
    }

    #[test]
    fn test_score_counts_correct_answers() {
        let mut app = App::new(vec![question(0), question(2)]);
        app.start_quiz();

        // first question: answer 0 (correct)
        app.submit_answer();
        // second question: answer 1 (wrong)
        app.select_next_option();
        app.submit_answer();

        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.calculate_score(), 1);
    }

    #[test]
    fn test_result_scroll_stays_in_bounds() {
        let mut app = App::new(vec![question(0), question(1)]);
        app.scroll_results_up();
        assert_eq!(app.result_scroll(), 0);

        app.scroll_results_down();
        app.scroll_results_down();
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 1);
    }
}
