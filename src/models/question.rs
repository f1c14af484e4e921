use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::markup::{Field, ListStyle, MarkupPolicy, ordered_list};
use crate::validation::{IssueKind, check_record};

/// Highest number of options a question may carry (labels `a` to `f`).
pub const MAX_OPTIONS: usize = 6;

/// Answer assumed when a record does not give one.
pub const DEFAULT_ANSWER: &str = "a";

/// Blank lines left for a written response in the test document.
const WRITTEN_RESPONSE_LINES: usize = 4;

const OPTION_LETTERS: [char; MAX_OPTIONS] = ['a', 'b', 'c', 'd', 'e', 'f'];

/// One question as it appears in a question bank, before any conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    pub prompt: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub additional_resource: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub fixed_order: Option<bool>,
}

impl QuestionRecord {
    /// Multiple-choice record with the given answer letter.
    pub fn multiple_choice<S: Into<String>>(prompt: S, options: Vec<String>, answer: &str) -> Self {
        Self {
            prompt: Some(prompt.into()),
            options: Some(options),
            answer: Some(answer.to_string()),
            ..Self::default()
        }
    }

    /// Free-response record.
    pub fn free_response<S: Into<String>>(prompt: S) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }
}

/// Position of an option within a question, bounded to `0..MAX_OPTIONS`.
///
/// Letters only exist at the edges: records are parsed with
/// [`OptionLabel::from_letter`] and documents print [`OptionLabel::letter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionLabel(u8);

impl OptionLabel {
    pub fn new(index: usize) -> Option<Self> {
        (index < MAX_OPTIONS).then(|| Self(index as u8))
    }

    /// Parses a single letter `a`..`f`, ignoring case and surrounding whitespace.
    pub fn from_letter(text: &str) -> Option<Self> {
        let mut chars = text.trim().chars();
        let letter = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() {
            return None;
        }
        OPTION_LETTERS
            .iter()
            .position(|&l| l == letter)
            .and_then(Self::new)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn letter(self) -> char {
        OPTION_LETTERS[self.index()]
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The correct answer of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Position of the correct option in the current option order.
    Choice(OptionLabel),
    /// Answer text of a free-response question, printed as given.
    Written(String),
}

impl Answer {
    pub fn label(&self) -> Option<OptionLabel> {
        match self {
            Answer::Choice(label) => Some(*label),
            Answer::Written(_) => None,
        }
    }
}

/// What the answer key prints for a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerDisplay {
    /// The option letter, e.g. `b`.
    #[default]
    Letter,
    /// The rendered text of the correct option.
    OptionText,
}

/// A single quiz item with its markup already converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    additional_resource: String,
    options: Option<Vec<String>>,
    answer: Answer,
    fixed_order: bool,
    policy: MarkupPolicy,
}

impl Question {
    /// Builds a question from a raw record, converting fields according to
    /// `policy`. Returns every problem found in the record if it is invalid.
    pub fn from_record(record: QuestionRecord, policy: &MarkupPolicy) -> Result<Self, Vec<IssueKind>> {
        let issues = check_record(&record);
        if !issues.is_empty() {
            return Err(issues);
        }

        let raw_answer = record.answer.unwrap_or_else(|| DEFAULT_ANSWER.to_string());
        let answer = if record.options.is_some() {
            let label = OptionLabel::from_letter(&raw_answer).ok_or_else(|| {
                vec![IssueKind::InvalidAnswer {
                    answer: raw_answer.clone(),
                }]
            })?;
            Answer::Choice(label)
        } else {
            Answer::Written(raw_answer)
        };

        let prompt = record.prompt.unwrap_or_default();
        let options = record.options.map(|options| {
            options
                .iter()
                .map(|option| policy.apply(Field::Option, option))
                .collect()
        });
        let additional_resource = record
            .additional_resource
            .map(|resource| policy.apply(Field::AdditionalResource, &resource))
            .unwrap_or_default();

        Ok(Self {
            prompt: policy.apply(Field::Prompt, &prompt),
            additional_resource,
            options,
            answer,
            fixed_order: record.fixed_order.unwrap_or(false),
            policy: *policy,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn additional_resource(&self) -> &str {
        &self.additional_resource
    }

    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn is_fixed_order(&self) -> bool {
        self.fixed_order
    }

    pub fn is_free_response(&self) -> bool {
        self.options.is_none()
    }

    /// Shuffles the options and moves the answer label along with the
    /// correct option. Does nothing for free-response and fixed-order
    /// questions.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.fixed_order {
            return;
        }
        let Some(options) = &self.options else {
            return;
        };

        let mut permutation: Vec<usize> = (0..options.len()).collect();
        permutation.shuffle(rng);
        self.reorder_options(&permutation);
    }

    /// Reorders the options so that new position `i` holds the option that
    /// was at `permutation[i]`, then remaps the answer to the new position
    /// of the previously correct option.
    ///
    /// `permutation` must be a permutation of `0..options.len()`.
    pub(crate) fn reorder_options(&mut self, permutation: &[usize]) {
        let Some(options) = self.options.as_mut() else {
            return;
        };
        debug_assert_eq!(permutation.len(), options.len());

        let reordered: Vec<String> = permutation.iter().map(|&old| options[old].clone()).collect();
        *options = reordered;

        if let Answer::Choice(label) = self.answer {
            let new_label = permutation
                .iter()
                .position(|&old| old == label.index())
                .and_then(OptionLabel::new);
            if let Some(new_label) = new_label {
                self.answer = Answer::Choice(new_label);
            }
        }
    }

    /// Markup for the test document: prompt, resource, then either the
    /// lettered options or blank lines for a written response.
    pub fn render_test(&self) -> String {
        let mut out = self.render_context();
        match &self.options {
            Some(options) => out.push_str(&ordered_list(options, ListStyle::Alphabetic)),
            None => out.push_str(&"<br>\n".repeat(WRITTEN_RESPONSE_LINES)),
        }
        out
    }

    /// Markup for the answer key. Verbose mode repeats the prompt and
    /// resource before the answer.
    pub fn render_answer_key(&self, verbose: bool, display: AnswerDisplay) -> String {
        let answer = self.formatted_answer(display);
        if !verbose {
            return answer;
        }
        let mut out = self.render_context();
        out.push_str(&answer);
        out
    }

    fn render_context(&self) -> String {
        let mut out = self.prompt.clone();
        if !self.additional_resource.is_empty() {
            out.push_str("<br>");
            out.push_str(&self.additional_resource);
            out.push('\n');
        }
        out
    }

    fn formatted_answer(&self, display: AnswerDisplay) -> String {
        match (&self.answer, display) {
            (Answer::Choice(label), AnswerDisplay::OptionText) => {
                match self.options().and_then(|options| options.get(label.index())) {
                    Some(option) => option.clone(),
                    None => self.policy.apply(Field::Answer, &label.letter().to_string()),
                }
            }
            (Answer::Choice(label), AnswerDisplay::Letter) => {
                self.policy.apply(Field::Answer, &label.letter().to_string())
            }
            (Answer::Written(text), _) => self.policy.apply(Field::Answer, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn arithmetic_question() -> Question {
        let record = QuestionRecord::multiple_choice("2+2=?", options(&["3", "4", "5"]), "b");
        Question::from_record(record, &MarkupPolicy::default()).unwrap()
    }

    fn correct_option(question: &Question) -> String {
        let label = question.answer().label().unwrap();
        question.options().unwrap()[label.index()].clone()
    }

    #[test]
    fn test_option_label_letters() {
        assert_eq!(OptionLabel::from_letter("a").map(OptionLabel::index), Some(0));
        assert_eq!(OptionLabel::from_letter(" F ").map(OptionLabel::index), Some(5));
        assert_eq!(OptionLabel::from_letter("g"), None);
        assert_eq!(OptionLabel::from_letter("ab"), None);
        assert_eq!(OptionLabel::from_letter(""), None);
        assert_eq!(OptionLabel::new(6), None);
        assert_eq!(OptionLabel::new(2).unwrap().to_string(), "c");
    }

    #[test]
    fn test_from_record_defaults() {
        let record = QuestionRecord {
            prompt: Some("Pick one".to_string()),
            options: Some(options(&["x", "y"])),
            ..QuestionRecord::default()
        };
        let question = Question::from_record(record, &MarkupPolicy::default()).unwrap();

        assert_eq!(question.answer(), &Answer::Choice(OptionLabel::new(0).unwrap()));
        assert!(!question.is_fixed_order());
        assert_eq!(question.additional_resource(), "");
        assert_eq!(question.prompt(), "<p>Pick one</p>\n");
        assert_eq!(question.options().unwrap(), ["<p>x</p>\n", "<p>y</p>\n"]);
    }

    #[test]
    fn test_additional_resource_is_not_converted() {
        let record = QuestionRecord {
            additional_resource: Some("<img src=\"graph.png\"> *as is*".to_string()),
            ..QuestionRecord::free_response("Describe the graph")
        };
        let question = Question::from_record(record, &MarkupPolicy::default()).unwrap();
        assert_eq!(question.additional_resource(), "<img src=\"graph.png\"> *as is*");
    }

    #[test]
    fn test_from_record_rejects_invalid_answer() {
        let record = QuestionRecord::multiple_choice("Q", options(&["x", "y"]), "d");
        let issues = Question::from_record(record, &MarkupPolicy::default()).unwrap_err();
        assert_eq!(
            issues,
            vec![IssueKind::AnswerOutOfRange {
                answer: 'd',
                options: 2
            }]
        );
    }

    #[test]
    fn test_remap_scenario_correct_option_moves_to_front() {
        let mut question = arithmetic_question();

        // old index 1 ("4") lands at new index 0
        question.reorder_options(&[1, 0, 2]);

        assert_eq!(question.answer().label().unwrap().letter(), 'a');
        assert_eq!(question.options().unwrap()[0], "<p>4</p>\n");
        assert!(question.render_test().contains("<ol type=\"a\">\n<li><p>4</p>\n</li>"));
    }

    #[test]
    fn test_remap_rotation() {
        let mut question = arithmetic_question();
        question.reorder_options(&[2, 0, 1]);

        assert_eq!(question.options().unwrap(), ["<p>5</p>\n", "<p>3</p>\n", "<p>4</p>\n"]);
        assert_eq!(question.answer().label().unwrap().letter(), 'c');
        assert_eq!(correct_option(&question), "<p>4</p>\n");
    }

    #[test]
    fn test_fixed_order_is_never_shuffled() {
        let record = QuestionRecord {
            fixed_order: Some(true),
            ..QuestionRecord::multiple_choice(
                "Order matters",
                options(&["first", "second", "third", "fourth", "fifth", "sixth"]),
                "e",
            )
        };
        let mut question = Question::from_record(record, &MarkupPolicy::default()).unwrap();
        let before = question.clone();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            question.shuffle(&mut rng);
        }
        assert_eq!(question, before);
    }

    #[test]
    fn test_free_response_shuffle_and_render() {
        let mut question =
            Question::from_record(QuestionRecord::free_response("Explain borrowing."), &MarkupPolicy::default())
                .unwrap();
        let before = question.clone();

        question.shuffle(&mut StdRng::seed_from_u64(1));

        assert_eq!(question, before);
        assert!(question.is_free_response());
        assert_eq!(
            question.render_test(),
            "<p>Explain borrowing.</p>\n<br>\n<br>\n<br>\n<br>\n"
        );
        assert_eq!(question.answer(), &Answer::Written("a".to_string()));
    }

    #[test]
    fn test_render_test_with_resource() {
        let record = QuestionRecord {
            additional_resource: Some("<pre>let x = 5;</pre>".to_string()),
            ..QuestionRecord::multiple_choice("What is x?", options(&["5", "6"]), "a")
        };
        let question = Question::from_record(record, &MarkupPolicy::default()).unwrap();

        assert_eq!(
            question.render_test(),
            "<p>What is x?</p>\n<br><pre>let x = 5;</pre>\n<ol type=\"a\">\n<li><p>5</p>\n</li>\n<li><p>6</p>\n</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_render_answer_key_shows_letter() {
        let question = arithmetic_question();

        assert_eq!(question.render_answer_key(false, AnswerDisplay::Letter), "<p>b</p>\n");
        assert_eq!(
            question.render_answer_key(true, AnswerDisplay::Letter),
            "<p>2+2=?</p>\n<p>b</p>\n"
        );
    }

    #[test]
    fn test_render_answer_key_option_text() {
        let question = arithmetic_question();
        assert_eq!(
            question.render_answer_key(false, AnswerDisplay::OptionText),
            "<p>4</p>\n"
        );
    }

    #[test]
    fn test_free_response_answer_key_prints_text() {
        let record = QuestionRecord {
            answer: Some("Ownership moves the *value*".to_string()),
            ..QuestionRecord::free_response("What does `let b = a;` do?")
        };
        let question = Question::from_record(record, &MarkupPolicy::default()).unwrap();
        assert_eq!(
            question.render_answer_key(false, AnswerDisplay::OptionText),
            "<p>Ownership moves the <em>value</em></p>\n"
        );
    }

    #[test]
    fn test_unshuffled_render_is_stable() {
        let question = arithmetic_question();
        assert_eq!(question.render_test(), question.render_test());
        assert_eq!(
            question.render_answer_key(true, AnswerDisplay::Letter),
            question.render_answer_key(true, AnswerDisplay::Letter)
        );
    }

    proptest! {
        #[test]
        fn shuffle_keeps_answer_on_correct_option(
            count in 1usize..=MAX_OPTIONS,
            answer in 0usize..MAX_OPTIONS,
            seed in any::<u64>(),
        ) {
            let answer = answer % count;
            let items: Vec<String> = (0..count).map(|i| format!("option {i}")).collect();
            let letter = OptionLabel::new(answer).unwrap().letter().to_string();
            let record = QuestionRecord::multiple_choice("Q", items, &letter);
            let mut question = Question::from_record(record, &MarkupPolicy::raw()).unwrap();
            let expected = correct_option(&question);

            let mut rng = StdRng::seed_from_u64(seed);
            question.shuffle(&mut rng);

            prop_assert_eq!(correct_option(&question), expected);

            let mut sorted = question.options().unwrap().to_vec();
            sorted.sort();
            let mut original: Vec<String> = (0..count).map(|i| format!("option {i}")).collect();
            original.sort();
            prop_assert_eq!(sorted, original);
        }
    }
}
