use rand::seq::IndexedRandom;

/// Longest conversation title taken from the first message.
const TITLE_LEN: usize = 40;

const STRESS_REPLIES: &[&str] = &[
    "It sounds like you're carrying a lot right now. A two minute box breathing exercise can take \
     the edge off. Want me to walk you through it?",
    "Stress often builds when everything feels urgent. Could you pick the one task that matters \
     most today and park the rest?",
];

const SLEEP_REPLIES: &[&str] = &[
    "Sleep makes a big difference to how the day feels. Keeping a consistent wind-down time is a \
     good first step. The sleep hygiene guide has more ideas.",
    "Screens late in the evening can make it harder to fall asleep. Would you like to try a short \
     relaxation audio before bed?",
];

const ANXIETY_REPLIES: &[&str] = &[
    "Thank you for sharing that. Grounding yourself by naming five things you can see can help in \
     the moment. If it keeps happening, the employee assistance programme is there for you.",
];

const WORK_REPLIES: &[&str] = &[
    "Workload conversations can feel awkward, but most managers would rather know early. Would it \
     help to plan what you want to say?",
    "Protecting some focus time in your calendar can make the workday feel more manageable. Want \
     some tips on setting boundaries?",
];

const GENERIC_REPLIES: &[&str] = &[
    "Thanks for checking in. How has your energy been over the last few days?",
    "I'm here to listen. What's been on your mind lately?",
    "That's helpful to know. Is there anything in particular you'd like support with today?",
];

/// Pick a canned assistant reply by keyword, falling back to a generic one.
pub fn canned_reply(message: &str) -> String {
    let lower = message.to_lowercase();
    let pool = if lower.contains("stress") {
        STRESS_REPLIES
    } else if lower.contains("sleep") {
        SLEEP_REPLIES
    } else if lower.contains("anxiety") || lower.contains("anxious") {
        ANXIETY_REPLIES
    } else if lower.contains("work") {
        WORK_REPLIES
    } else {
        GENERIC_REPLIES
    };

    pool.choose(&mut rand::rng())
        .copied()
        .unwrap_or(GENERIC_REPLIES[0])
        .to_string()
}

/// Conversation title derived from its first message.
pub fn title_from(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= TITLE_LEN {
        return trimmed.to_string();
    }
    let mut title: String = trimmed.chars().take(TITLE_LEN).collect();
    title.push_str("...");
    title
}
