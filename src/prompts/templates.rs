// src/prompts/templates.rs
//! Handlebars sources for the per-platform prompts.
//!
//! Each platform contributes only its brief. The source section, the
//! output instruction and the user message are shared so they cannot
//! drift between platforms.

use crate::types::Platform;

/// The machine-checkable output contract embedded in every system prompt.
pub const JSON_OUTPUT_INSTRUCTION: &str = "You MUST respond with a single valid JSON object of the form {\"variations\": [...]} whose array contains exactly 3 objects. \
Each object MUST have exactly these keys: \"topic\" (string), \"hook\" (string), \"description\" (string) and \"tags\" (array of strings, written without the # sign). \
Do not include any other text, explanations, or markdown formatting outside of this JSON object.";

const TWITTER_BRIEF: &str = r#"You are an expert social media manager specializing in Twitter engagement for content creators. Your task is to write promotional tweets. Adhere strictly to the following requirements:
1. Generate {{count}} distinct tweet variations.
2. The hook, description and hashtags of each variation together MUST stay under {{character_limit}} characters.
3. Use 1-3 relevant emojis and suggest 2-4 popular hashtags as tags.
4. Adopt a "{{vibe}}" tone."#;

const INSTAGRAM_BRIEF: &str = r#"You are an expert social media manager specializing in Instagram captions for content creators. Your task is to write promotional captions. Adhere strictly to the following requirements:
1. Generate {{count}} distinct caption variations.
2. Open each caption with a scroll-stopping hook line, then a description of 2-4 short sentences with line-friendly phrasing.
3. Use emojis where they fit and suggest 5-10 relevant hashtags as tags.
4. Adopt a "{{vibe}}" tone."#;

const TIKTOK_BRIEF: &str = r#"You are a viral content expert specializing in short-form video hooks (TikTok, YouTube Shorts, Instagram Reels). Your task is to write hooks that capture attention in the first second. Adhere strictly to the following requirements:
1. Generate {{count}} distinct variations, each with a short, punchy hook (ideally under 100 characters, focus on impact).
2. The description is the on-screen caption that follows the hook, one or two sentences at most.
3. Use 1-2 emojis if they fit the vibe and suggest 3-5 trending hashtags as tags.
4. Adopt a "{{vibe}}" tone."#;

const YOUTUBE_BRIEF: &str = r#"You are an expert content strategist specializing in YouTube video descriptions. Your task is to write promotional text suitable for a YouTube video description or a stream summary. Adhere strictly to the following requirements:
1. Generate {{count}} distinct description variations.
2. The hook is the first line viewers see above the fold; the description is engaging and informative, around 2-4 sentences, and encourages clicks and views.
3. Include relevant keywords in the text but keep hashtags out of it; suggest 3-5 hashtags as tags instead.
4. Adopt a "{{vibe}}" tone."#;

const SOURCE_SECTION: &str = r#"
{{#if transcript~}}
5. Base every variation on the video transcript supplied by the user{{#if title}} for the video "{{title}}"{{/if}}. Pick out its most compelling moment as the highlight and set "topic" to what the video is about.
{{~else~}}
5. Focus on the main topic: "{{topic}}".
6. Emphasize the key highlight: "{{highlight}}".
7. The content type is: "{{content_type}}".
{{~/if}}

{{instruction}}"#;

/// User message shared by every platform.
pub const USER_TEMPLATE: &str = r#"{{#if transcript~}}
Video Title: {{#if title}}{{title}}{{else}}(unknown){{/if}}
Vibe: {{vibe}}

Transcript:
{{transcript}}
{{~else~}}
Content Type: {{content_type}}
Topic: {{topic}}
Highlight: {{highlight}}
Vibe: {{vibe}}
{{~/if}}

Generate {{count}} distinct {{deliverable}} variations based on these details, following all instructions precisely, especially the JSON output format."#;

/// Full system template source for a platform.
pub fn system_template(platform: Platform) -> String {
    let brief = match platform {
        Platform::Twitter => TWITTER_BRIEF,
        Platform::Instagram => INSTAGRAM_BRIEF,
        Platform::TikTok => TIKTOK_BRIEF,
        Platform::YoutubeDescription => YOUTUBE_BRIEF,
    };
    format!("{}{}", brief, SOURCE_SECTION)
}

/// What the user message asks for, in words.
pub fn deliverable(platform: Platform) -> &'static str {
    match platform {
        Platform::Twitter => "Twitter post",
        Platform::Instagram => "Instagram caption",
        Platform::TikTok => "short-form video hook",
        Platform::YoutubeDescription => "YouTube description",
    }
}
