use crate::page::FetchedPage;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant that analyzes the contents of a website \
and provides a short summary, ignoring text that might be navigation related. \
Respond in markdown.";

/// The system and user messages sent to the model for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Renders the fixed summary request for `page`. The page text goes in
/// verbatim; no truncation happens here.
pub fn build_prompt(page: &FetchedPage, system_prompt: Option<&str>) -> Prompt {
    let system = system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT).to_string();

    let mut user = String::with_capacity(page.text().len() + page.title().len() + 200);
    user.push_str("You are looking at a website titled \"");
    user.push_str(page.title());
    user.push_str("\"\n\nThe contents of this website is as follows; please provide a short summary of this website in markdown. \n");
    user.push_str("If it includes news or announcements, then summarize these too.\n\n");
    user.push_str(page.text());

    Prompt { system, user }
}
