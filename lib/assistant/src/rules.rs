//! The assistant's ordered rule table.
//!
//! Rules are evaluated top to bottom against the lower-cased utterance and the
//! first match wins. The standard table is laid out in four bands:
//!
//! 1. exact menu commands (some gated on login)
//! 2. the `loan id <X>` lookup
//! 3. topic keywords (substring tests, independent of login)
//! 4. greeting, thanks and the catch-all fallback
//!
//! Menu commands sit above the keywords so that a keyword such as "emi" or
//! "apply" can never shadow the exact command a user clicked.

use crate::context::SessionContext;
use crate::response::{Effect, Response, Route};
use crate::roster::LoanRoster;
use plms_core::LoanId;
use std::time::Duration;

/// Top-level menu offered by the greeting, "Back to Main Menu" and the fallback.
pub const MAIN_MENU: [&str; 6] = [
    "Check EMI Status",
    "Pay EMI",
    "Loan Application Status",
    "Apply for a New Loan",
    "Document Assistance",
    "Contact Support",
];

/// Options offered when a command requires login.
pub const LOGIN_OPTIONS: [&str; 2] = ["Login", "Back to Main Menu"];

pub const BACK_TO_MENU: &str = "Back to Main Menu";

/// Fallback text for input no rule understood.
pub const FALLBACK_TEXT: &str =
    "🤔 Sorry, I didn’t get that. Please select an option or try asking again.";

/// Everything a responder may read.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// The trimmed utterance as the user wrote it.
    pub utterance: &'a str,
    /// The lower-cased utterance.
    pub normalized: &'a str,
    pub context: &'a SessionContext,
    pub roster: &'a LoanRoster,
    /// Delay before a redirect-style command navigates.
    pub redirect_delay: Duration,
}

/// How a rule decides whether it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Full-string equality with a lower-case phrase.
    Exact(&'static str),
    /// The utterance starts with a lower-case phrase.
    Prefix(&'static str),
    /// The utterance contains any of the lower-case terms.
    AnyOf(&'static [&'static str]),
    /// Always matches.
    Always,
}

impl Matcher {
    /// Tests the normalized utterance.
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            Self::Exact(phrase) => normalized == *phrase,
            Self::Prefix(phrase) => normalized.starts_with(*phrase),
            Self::AnyOf(terms) => terms.iter().any(|term| normalized.contains(*term)),
            Self::Always => true,
        }
    }
}

/// How a rule builds its response.
#[derive(Debug, Clone, Copy)]
pub enum Responder {
    /// A fixed text and option list.
    Fixed {
        text: &'static str,
        options: &'static [&'static str],
    },
    /// A response computed from the rule input.
    Dynamic(fn(&RuleInput<'_>) -> Response),
}

impl Responder {
    fn respond(&self, input: &RuleInput<'_>) -> Response {
        match self {
            Self::Fixed { text, options } => Response::new(*text, options.iter().copied()),
            Self::Dynamic(build) => build(input),
        }
    }
}

/// A named (matcher, responder) pair.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    name: &'static str,
    matcher: Matcher,
    responder: Responder,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(name: &'static str, matcher: Matcher, responder: Responder) -> Self {
        Self {
            name,
            matcher,
            responder,
        }
    }

    /// Exact menu command with a computed response.
    #[must_use]
    pub const fn command(
        name: &'static str,
        phrase: &'static str,
        build: fn(&RuleInput<'_>) -> Response,
    ) -> Self {
        Self::new(name, Matcher::Exact(phrase), Responder::Dynamic(build))
    }

    /// Exact menu command with a fixed response.
    #[must_use]
    pub const fn fixed_command(
        name: &'static str,
        phrase: &'static str,
        text: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, Matcher::Exact(phrase), Responder::Fixed { text, options })
    }

    /// Topic keyword rule with a fixed response.
    #[must_use]
    pub const fn keyword(
        name: &'static str,
        terms: &'static [&'static str],
        text: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, Matcher::AnyOf(terms), Responder::Fixed { text, options })
    }

    /// The rule's name, used in logs and tests.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The rule's matcher.
    #[must_use]
    pub fn matcher(&self) -> Matcher {
        self.matcher
    }

    /// Returns true if this rule applies to the normalized utterance.
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        self.matcher.matches(normalized)
    }

    /// Builds the response.
    #[must_use]
    pub fn respond(&self, input: &RuleInput<'_>) -> Response {
        self.responder.respond(input)
    }
}

/// Ordered rule list, evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Creates a table from rules in priority order.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The PLMS Assistant rule table.
    #[must_use]
    pub fn standard() -> Self {
        let mut rules = Vec::new();
        rules.extend_from_slice(&COMMAND_RULES);
        rules.push(Rule::new(
            "loan_id_lookup",
            Matcher::Prefix("loan id"),
            Responder::Dynamic(loan_id_lookup),
        ));
        rules.extend_from_slice(&KEYWORD_RULES);
        rules.extend_from_slice(&CLOSING_RULES);
        Self::new(rules)
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the first rule matching the normalized utterance.
    #[must_use]
    pub fn first_match(&self, normalized: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(normalized))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

const COMMAND_RULES: [Rule; 11] = [
    Rule::command("login", "login", login),
    Rule::command("check_emi_status", "check emi status", check_emi_status),
    Rule::command("pay_emi", "pay emi", pay_emi),
    Rule::command(
        "loan_application_status",
        "loan application status",
        loan_application_status,
    ),
    Rule::command("apply_for_loan", "apply for a new loan", apply_for_loan),
    Rule::fixed_command(
        "document_assistance",
        "document assistance",
        "📄 I can assist with document requirements or uploads.",
        &["View Required Documents", "Upload Documents", BACK_TO_MENU],
    ),
    Rule::command(
        "view_required_documents",
        "view required documents",
        view_required_documents,
    ),
    Rule::command("upload_documents", "upload documents", upload_documents),
    Rule::fixed_command(
        "contact_support",
        "contact support",
        "📞 Contact us at:\n• Email: support@plms.com\n• Phone: 1800-123-4567\nWould you like to start a live chat?",
        &["Start Live Chat", BACK_TO_MENU],
    ),
    Rule::fixed_command(
        "start_live_chat",
        "start live chat",
        "Connecting to a support agent... Please wait.",
        &[BACK_TO_MENU],
    ),
    Rule::fixed_command(
        "back_to_main_menu",
        "back to main menu",
        "How can I assist you today?",
        &MAIN_MENU,
    ),
];

const KEYWORD_RULES: [Rule; 15] = [
    Rule::keyword(
        "upload_topic",
        &["upload"],
        "📤 You can upload documents from the Upload Documents page once you are logged in. Accepted formats are PDF, JPG and PNG up to 5 MB each.",
        &["Upload Documents", BACK_TO_MENU],
    ),
    Rule::keyword(
        "kyc_topic",
        &["kyc"],
        "🪪 KYC is completed with your PAN Card and Aadhar Card. Verification usually finishes within 24 hours of upload.",
        &["View Required Documents", BACK_TO_MENU],
    ),
    Rule::keyword(
        "documents_topic",
        &["document", "papers"],
        "📋 A loan application needs your PAN Card, Aadhar Card, bank statements for the last 6 months and salary slips for the last 3 months.",
        &["View Required Documents", "Upload Documents", BACK_TO_MENU],
    ),
    Rule::keyword(
        "minimum_amount_topic",
        &["minimum", "min amount", "lowest amount"],
        "💰 The minimum loan amount is ₹50,000 and the maximum is ₹25,00,000, depending on eligibility.",
        &["Apply for a New Loan", BACK_TO_MENU],
    ),
    Rule::keyword(
        "interest_rate_topic",
        &["interest", "rate of interest"],
        "📈 Our interest rates start at 10.5% per annum. The final rate depends on your credit profile and loan tenure.",
        &["Apply for a New Loan", BACK_TO_MENU],
    ),
    Rule::keyword(
        "eligibility_topic",
        &["eligib", "qualify"],
        "✅ You are eligible if you are 21–60 years old, have a steady monthly income of at least ₹25,000 and a credit score of 700 or above.",
        &["Apply for a New Loan", BACK_TO_MENU],
    ),
    Rule::keyword(
        "prepayment_topic",
        &["prepay", "pre-pay", "foreclos"],
        "🏦 You can prepay or foreclose your loan after 6 EMIs. A prepayment charge of 2% applies on the outstanding principal.",
        &["Contact Support", BACK_TO_MENU],
    ),
    Rule::keyword(
        "approval_time_topic",
        &["approval", "approve", "how long"],
        "⏱️ Most applications are reviewed within 2–3 business days once all documents are verified.",
        &["Loan Application Status", BACK_TO_MENU],
    ),
    Rule::keyword(
        "password_reset_topic",
        &["password", "forgot"],
        "🔑 Use “Forgot Password” on the login page. We will send a one-time code to your registered email to reset it.",
        &["Login", BACK_TO_MENU],
    ),
    Rule::keyword(
        "support_contact_topic",
        &["support", "contact", "customer care", "helpline"],
        "📞 Our support team is available Monday to Saturday, 9:00 AM – 6:00 PM at support@plms.com or 1800-123-4567.",
        &["Start Live Chat", BACK_TO_MENU],
    ),
    Rule::keyword(
        "status_topic",
        &["status", "track"],
        "🔎 I can show the status of your EMIs or of your loan applications. Which one would you like?",
        &["Check EMI Status", "Loan Application Status", BACK_TO_MENU],
    ),
    Rule::keyword(
        "emi_topic",
        &["emi", "installment", "instalment"],
        "🗓️ EMIs are due on the 10th of every month. You can check upcoming EMIs or pay one right here.",
        &["Check EMI Status", "Pay EMI", BACK_TO_MENU],
    ),
    Rule::keyword(
        "apply_topic",
        &["apply", "new loan"],
        "📝 Applying takes about 10 minutes. Keep your documents handy and start the application whenever you are ready.",
        &["Apply for a New Loan", BACK_TO_MENU],
    ),
    Rule::keyword(
        "dashboard_topic",
        &["dashboard", "my account"],
        "📊 Your dashboard shows your loans, repayment schedule and uploaded documents. Log in to open it.",
        &[BACK_TO_MENU],
    ),
    Rule::keyword(
        "news_topic",
        &["news", "announcement", "latest update"],
        "📰 Latest update: EMI payments can now be made online with UPI, cards and net banking.",
        &[BACK_TO_MENU],
    ),
];

const CLOSING_RULES: [Rule; 3] = [
    Rule::keyword(
        "greeting",
        &["hello", "hi"],
        "👋 Hi there! I'm your PLMS Assistant. Ask me anything related to loans, documents, or EMI payments.",
        &MAIN_MENU,
    ),
    Rule::keyword(
        "thanks",
        &["thank"],
        "😊 You're welcome! Let me know if I can assist you with anything else.",
        &[BACK_TO_MENU],
    ),
    Rule::new(
        "fallback",
        Matcher::Always,
        Responder::Fixed {
            text: FALLBACK_TEXT,
            options: &MAIN_MENU,
        },
    ),
];

fn login_prompt(text: &str) -> Response {
    Response::new(text, LOGIN_OPTIONS)
}

fn redirect(text: &str, delay: Duration, follow_up: Vec<Effect>) -> Response {
    let mut deferred = vec![Effect::SetLoading { loading: false }];
    deferred.extend(follow_up);
    Response::new(text, Vec::<String>::new())
        .with_effect(Effect::SetLoading { loading: true })
        .with_effect(Effect::after(delay, deferred))
}

fn login(_input: &RuleInput<'_>) -> Response {
    Response::silent(vec![Effect::navigate(Route::Login)])
}

fn check_emi_status(input: &RuleInput<'_>) -> Response {
    if !input.context.is_logged_in {
        return login_prompt(
            "ℹ️ You're not logged in, so here’s a sample EMI overview:\n\n• Loan ID: LN12345 (Active)\n  EMI: ₹12,500 due on May 10, 2025\n\nLogin to view your actual EMIs.",
        );
    }

    let loans = input.roster.loans();
    let text = if loans.is_empty() {
        "You have no active loans.".to_string()
    } else {
        let lines: Vec<String> = loans
            .iter()
            .map(|loan| {
                format!(
                    "• Loan ID: {} ({})\n  EMI: {}",
                    loan.id,
                    loan.status,
                    loan.emi_label()
                )
            })
            .collect();
        format!("Your active loans:\n{}", lines.join("\n"))
    };
    Response::new(text, [BACK_TO_MENU])
}

fn pay_emi(input: &RuleInput<'_>) -> Response {
    if !input.context.is_logged_in {
        return login_prompt("🔐 Please log in to proceed with EMI payment.");
    }
    redirect(
        "Initiating payment session...",
        input.redirect_delay,
        vec![
            Effect::Emit {
                text: "✅ Redirecting to the EMI payment portal...".to_string(),
                options: vec![BACK_TO_MENU.to_string()],
            },
            Effect::navigate(Route::PayEmi),
        ],
    )
}

fn loan_application_status(input: &RuleInput<'_>) -> Response {
    if !input.context.is_logged_in {
        return login_prompt(
            "ℹ️ Here's a sample of your loan applications:\n\n• Loan ID: LN67890 (Under Review)\n\nLogin to view your actual applications.",
        );
    }

    let loans = input.roster.loans();
    let text = if loans.is_empty() {
        "No loan applications found.".to_string()
    } else {
        let lines: Vec<String> = loans
            .iter()
            .map(|loan| format!("• Loan ID: {} ({})", loan.id, loan.status))
            .collect();
        format!("Your applications:\n{}", lines.join("\n"))
    };
    Response::new(text, [BACK_TO_MENU])
}

fn apply_for_loan(input: &RuleInput<'_>) -> Response {
    if !input.context.is_logged_in {
        return login_prompt("🔐 Please log in to apply for a loan.");
    }
    redirect(
        "Redirecting to the loan application form...",
        input.redirect_delay,
        vec![Effect::navigate(Route::ApplyLoan)],
    )
}

fn view_required_documents(input: &RuleInput<'_>) -> Response {
    let lines: Vec<String> = input
        .roster
        .required_documents()
        .iter()
        .map(|doc| format!("• {doc}"))
        .collect();
    Response::new(
        format!("📋 Required Documents:\n{}", lines.join("\n")),
        ["Upload Documents", BACK_TO_MENU],
    )
}

fn upload_documents(input: &RuleInput<'_>) -> Response {
    if !input.context.is_logged_in {
        return login_prompt("🔐 Please log in to upload your documents.");
    }
    redirect(
        "Redirecting to the document upload page...",
        input.redirect_delay,
        vec![Effect::navigate(Route::UploadDocuments)],
    )
}

fn loan_id_lookup(input: &RuleInput<'_>) -> Response {
    let token = input.utterance.split_whitespace().last().unwrap_or_default();
    let loan_id = LoanId::new(token);
    let text = match input.roster.find(&loan_id) {
        Some(loan) => format!(
            "Loan ID: {}\nStatus: {}\nEMI: {}",
            loan.id,
            loan.status,
            loan.emi_label()
        ),
        None => format!("Loan ID {loan_id} not found."),
    };
    Response::new(text, [BACK_TO_MENU])
}
