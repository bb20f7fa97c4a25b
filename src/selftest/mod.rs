//! Built-in smoke check over three supported languages and one unsupported.

use std::fmt;

use crate::core::error::TranslateError;
use crate::core::types::Mode;
use crate::dispatch::Translator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfTestCase {
    pub text: &'static str,
    pub language: &'static str,
}

pub const SELF_TEST_CASES: [SelfTestCase; 4] = [
    SelfTestCase {
        text: "Hello",
        language: "French",
    },
    SelfTestCase {
        text: "How are you?",
        language: "German",
    },
    SelfTestCase {
        text: "Good morning",
        language: "Romanian",
    },
    SelfTestCase {
        text: "Hello",
        language: "Spanish",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed { result: String },
    /// The dispatcher declined the language.
    Rejected { result: String },
    Errored { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub case: SelfTestCase,
    pub outcome: CaseOutcome,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed { .. })
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Test '{}' to {}: ", self.case.text, self.case.language)?;
        match &self.outcome {
            CaseOutcome::Passed { result } => write!(f, "Passed\nResult: {result}"),
            CaseOutcome::Rejected { result } => write!(f, "Failed\nResult: {result}"),
            CaseOutcome::Errored { reason } => write!(f, "Failed - {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestReport {
    pub mode: Mode,
    pub cases: Vec<CaseReport>,
}

impl SelfTestReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, case) in self.cases.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{case}")?;
        }
        Ok(())
    }
}

/// Runs every fixed case in order against `mode`. Never fails as a whole;
/// each case records its own outcome.
pub async fn run_self_test(translator: &Translator, mode: Mode) -> SelfTestReport {
    let mut cases = Vec::with_capacity(SELF_TEST_CASES.len());

    for case in SELF_TEST_CASES {
        let outcome = match translator
            .translate_text(case.text, case.language, mode)
            .await
        {
            Ok(translation) => CaseOutcome::Passed {
                result: translation.text,
            },
            Err(error @ TranslateError::UnsupportedLanguage { .. }) => CaseOutcome::Rejected {
                result: error.display_text(),
            },
            Err(error) => CaseOutcome::Errored {
                reason: error.display_text(),
            },
        };
        cases.push(CaseReport { case, outcome });
    }

    SelfTestReport { mode, cases }
}
