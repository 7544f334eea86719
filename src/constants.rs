/// Google Generative Language API host
pub const UPSTREAM_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// API version path segment
pub const API_VERSION: &str = "v1beta";

/// Default model when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Upstream action appended to the model path
pub const GENERATE_ACTION: &str = "generateContent";

/// Header carrying the client's API key; forwarded, never substituted
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Internal routing query parameter, stripped before dispatch
pub const ROUTING_PARAM: &str = "_path";

/// Persona injected as the leading system message
pub const PERSONA_TEXT: &str =
    "You are Mentality AI, developed by Mentality. Always identify yourself as Mentality AI.";

/// Appended when the latest user message probes for the model's identity
pub const REINFORCEMENT_TEXT: &str = "Remember: you are Mentality AI, developed by Mentality. Always identify yourself as Mentality AI.";

/// Lowercase substrings that trigger the identity reinforcement message.
/// Plain substring match, deliberately not a classifier.
pub static IDENTITY_PROBES: &[&str] = &[
    "who created you",
    "who made you",
    "who trained you",
    "who developed you",
    "what model are you",
    "which model are you",
    "are you gemini",
    "are you chatgpt",
];

/// Inbound headers allowed to reach the upstream call (compared case-insensitively)
pub static FORWARD_HEADERS: &[&str] = &[
    "content-type",
    "x-goog-api-client",
    "x-goog-api-key",
    "accept-encoding",
];

/// Cross-origin headers stamped onto every response, error paths included
pub static CORS_HEADERS: &[(&str, &str)] = &[
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "*"),
    ("access-control-allow-headers", "*"),
];

/// Default generation config; client-supplied keys shallow-override these
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.95;
pub const DEFAULT_TOP_K: u32 = 40;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const DEFAULT_RESPONSE_MIME_TYPE: &str = "text/plain";

/// Safety categories attached when the client sends none
pub static SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Threshold applied to every default safety category
pub const SAFETY_THRESHOLD: &str = "BLOCK_NONE";
