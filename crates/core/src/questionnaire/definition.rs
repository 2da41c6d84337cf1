use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable key used as the profile attribute name.
    pub topic: String,
    pub prompt: String,
    pub options: Vec<String>,
}

pub(super) fn builtin_questions() -> Vec<Question> {
    const QUESTIONS: &[(&str, &str, &[&str])] = &[
        (
            "objective",
            "What is your primary investment objective?",
            &["Wealth accumulation", "Regular income", "Capital preservation", "Saving for a specific goal"],
        ),
        (
            "horizon",
            "Over what period do you plan to keep your money invested?",
            &["<1 year", "1-3 years", "3-5 years", "5-10 years", ">10 years"],
        ),
        (
            "risk_comfort",
            "How comfortable are you with market ups and downs?",
            &[
                "Very uncomfortable",
                "Somewhat uncomfortable",
                "Neutral",
                "Somewhat comfortable",
                "Very comfortable",
            ],
        ),
        (
            "loss_reaction",
            "If your portfolio lost 20% in a year, what would you do?",
            &["Sell everything", "Sell some", "Do nothing", "Buy more"],
        ),
        (
            "return_expectation",
            "What is the minimum annual return you expect?",
            &["<2%", "2-5%", "5-8%", "8-12%", ">12%"],
        ),
        (
            "liquidity_need",
            "How important is quick access to your money?",
            &["Very important", "Somewhat important", "Not very important", "Not important at all"],
        ),
        (
            "experience",
            "Do you have any experience with investments?",
            &["No, none at all", "Yes, a little", "Yes, regularly"],
        ),
        (
            "savings_share",
            "What percentage of your savings will you invest?",
            &["<10%", "10-25%", "25-50%", "50-75%", ">75%"],
        ),
        (
            "risk_reward",
            "Which best describes your risk vs. reward attitude?",
            &["Protect capital", "Balanced", "Accept losses for gains", "Seek maximum growth"],
        ),
        (
            "income_stability",
            "How stable do you expect your income to be?",
            &["Very stable", "Somewhat stable", "Uncertain", "Likely to decrease"],
        ),
        (
            "major_expenses",
            "Do you anticipate any major expenses in the next three years?",
            &["Yes", "No"],
        ),
        (
            "cash_share",
            "What percentage of your assets is in cash now?",
            &["None", "<10%", "10-25%", "25-50%", ">50%"],
        ),
        (
            "underperformance_reaction",
            "If an investment underperforms for six months, what would you do?",
            &["Sell immediately", "Re-evaluate", "Hold through", "Buy more"],
        ),
        (
            "esg_interest",
            "Are you interested in ESG-focused investments?",
            &["Yes", "No", "Unsure"],
        ),
        (
            "leverage",
            "Would you consider investing with borrowed money to achieve higher returns?",
            &["No, definitely not", "Only if an expert recommends it", "Yes, I can imagine doing that"],
        ),
    ];

    QUESTIONS
        .iter()
        .map(|(topic, prompt, options)| Question {
            topic: topic.to_string(),
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        })
        .collect()
}
