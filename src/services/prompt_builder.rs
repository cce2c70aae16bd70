//! Prompt templates for the two provider calls.

/// Prompt asking the model for one post per platform, with the headers the
/// section parser expects.
pub fn social_posts_prompt(event_details: &str) -> String {
    format!(
        "Create social media posts for LinkedIn, Twitter, and WhatsApp about the following event:\n\
         \n\
         {event_details}\n\
         \n\
         The tone should be professional but with a touch of humor - nothing over the top.\n\
         \n\
         For each platform, follow these guidelines:\n\
         \n\
         1. LinkedIn: A professional post that showcases the event's value, around 1-2 paragraphs with appropriate hashtags.\n\
         \n\
         2. Twitter: A concise, engaging post under 280 characters that captures attention, with relevant hashtags.\n\
         \n\
         3. WhatsApp: A friendly, informative message that people would want to share with friends or colleagues.\n\
         \n\
         Format the response clearly with headers for each platform."
    )
}

/// Prompt for the promotional image.
pub fn event_image_prompt(event_details: &str) -> String {
    format!(
        "Create a professional, visually appealing promotional image for this event:\n\
         \n\
         {event_details}\n\
         \n\
         The image should be suitable for social media posts across LinkedIn, Twitter, and WhatsApp.\n\
         It should be modern, clean, and engaging with elements that represent the event's theme."
    )
}
