//! Contract content: generation contract, fallback templates, prompts, and
//! write-time sanitation.
//!
//! The generation service is an external collaborator behind
//! [`ContentGenerator`]. Callers go through [`generate_or_fallback`], which
//! never fails: any error or unusable output is replaced by the fixed
//! template for the vendor type.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;

use crate::amount::Amount;
use crate::vendor::VendorType;

// ---------------------------------------------------------------------------
// Generation contract
// ---------------------------------------------------------------------------

/// Facts handed to the generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest {
    pub vendor_type: VendorType,
    pub vendor_name: String,
    pub client_name: String,
    pub event_date: NaiveDate,
    pub venue: String,
    pub service_package: String,
    pub amount: Amount,
    /// Optional section to focus on instead of the full contract.
    pub section: Option<String>,
}

/// Failures of the generation service. Never surfaced to API callers.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No generator is configured (e.g. missing API key).
    #[error("Content generation is not configured")]
    Unavailable,

    /// Transport-level failure (network, DNS, TLS, timeout).
    #[error("Content generation request failed: {0}")]
    Request(String),

    /// The service answered with a non-2xx status.
    #[error("Content generation service returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The service answered but carried no usable text.
    #[error("Content generation service returned no content")]
    EmptyResponse,
}

/// Text generation capability.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &ContentRequest) -> Result<String, GenerationError>;
}

/// Where the returned content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Generated,
    Fallback,
}

/// Result of [`generate_or_fallback`].
#[derive(Debug)]
pub struct GeneratedContent {
    pub content: String,
    pub source: ContentSource,
    /// The absorbed failure when `source` is [`ContentSource::Fallback`].
    pub failure: Option<GenerationError>,
}

/// Ask the generator for content and substitute the vendor's fallback
/// template on any failure or empty output.
pub async fn generate_or_fallback(
    generator: &dyn ContentGenerator,
    request: &ContentRequest,
) -> GeneratedContent {
    let failure = match generator.generate(request).await {
        Ok(raw) => {
            let cleaned = sanitize_html(&strip_code_fences(&raw));
            if !cleaned.trim().is_empty() {
                return GeneratedContent {
                    content: cleaned,
                    source: ContentSource::Generated,
                    failure: None,
                };
            }
            GenerationError::EmptyResponse
        }
        Err(e) => e,
    };

    GeneratedContent {
        content: fallback_content(request.vendor_type).to_string(),
        source: ContentSource::Fallback,
        failure: Some(failure),
    }
}

/// A generator that always reports [`GenerationError::Unavailable`].
///
/// Used when no generation service is configured, so every request falls
/// back to the static templates.
pub struct DisabledGenerator;

#[async_trait]
impl ContentGenerator for DisabledGenerator {
    async fn generate(&self, _request: &ContentRequest) -> Result<String, GenerationError> {
        Err(GenerationError::Unavailable)
    }
}

// ---------------------------------------------------------------------------
// Fallback templates
// ---------------------------------------------------------------------------

pub const PHOTOGRAPHER_FALLBACK: &str = "<h2>Photography Services Agreement</h2>
<h3>Services Provided</h3>
<ul>
<li>Wedding day photography coverage (8 hours)</li>
<li>Edited high-resolution images</li>
<li>Online gallery delivery</li>
<li>Professional editing and color correction</li>
</ul>
<h3>Payment Terms</h3>
<ul>
<li>50% deposit required to secure date</li>
<li>Remaining balance due 30 days before event</li>
<li>Late payments subject to 1.5% monthly service charge</li>
</ul>
<h3>Cancellation Policy</h3>
<ul>
<li>Full refund if cancelled 90+ days before event</li>
<li>50% refund if cancelled 30-89 days before event</li>
<li>No refund if cancelled within 30 days of event</li>
</ul>";

pub const CATERER_FALLBACK: &str = "<h2>Catering Services Agreement</h2>
<h3>Services Provided</h3>
<ul>
<li>Menu preparation and service</li>
<li>Professional wait staff</li>
<li>Setup and cleanup</li>
<li>All necessary serving equipment</li>
</ul>
<h3>Payment Terms</h3>
<ul>
<li>25% deposit required to secure date</li>
<li>Final guest count due 7 days before event</li>
<li>Final payment due day of event</li>
</ul>
<h3>Cancellation Policy</h3>
<ul>
<li>Full refund if cancelled 60+ days before event</li>
<li>50% refund if cancelled 30-59 days before event</li>
<li>25% refund if cancelled within 30 days</li>
</ul>";

pub const FLORIST_FALLBACK: &str = "<h2>Floral Services Agreement</h2>
<h3>Services Provided</h3>
<ul>
<li>Bridal bouquet and boutonnieres</li>
<li>Ceremony and reception arrangements</li>
<li>Setup and delivery</li>
<li>Fresh, high-quality flowers</li>
</ul>
<h3>Payment Terms</h3>
<ul>
<li>50% deposit required to secure date</li>
<li>Remaining balance due 14 days before event</li>
<li>Credit card payments accepted</li>
</ul>
<h3>Cancellation Policy</h3>
<ul>
<li>Full refund if cancelled 30+ days before event</li>
<li>25% refund if cancelled 14-29 days before event</li>
<li>No refund if cancelled within 14 days</li>
</ul>";

/// The fixed template for a vendor type.
pub fn fallback_content(vendor_type: VendorType) -> &'static str {
    match vendor_type {
        VendorType::Photographer => PHOTOGRAPHER_FALLBACK,
        VendorType::Caterer => CATERER_FALLBACK,
        VendorType::Florist => FLORIST_FALLBACK,
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

pub const SYSTEM_PROMPT: &str = "You are a professional contract writer specializing in \
wedding vendor contracts. Generate professional, legally-appropriate contract content in \
clean HTML format. Be specific to the vendor type and include relevant clauses. Return only \
clean HTML content without any markdown code fences. Use proper HTML tags like <h2>, <p>, \
<ul>, <li>, <strong>. Do not include any markdown syntax like # or *.";

/// Build the user prompt for a request. `today` is stamped into the contract.
pub fn build_user_prompt(request: &ContentRequest, today: NaiveDate) -> String {
    let scope = match request.section.as_deref().map(str::trim) {
        Some(section) if !section.is_empty() => {
            format!("Focus specifically on the {section} section.")
        }
        _ => "Include all standard sections: payment terms, services provided, \
              cancellation policy, and vendor-specific clauses."
            .to_string(),
    };

    format!(
        "Generate a professional wedding contract for a {vendor_type} with these details:\n\
         - Client: {client}\n\
         - Event Date: {date}\n\
         - Venue: {venue}\n\
         - Service: {service}\n\
         - Amount: ${amount}\n\
         - Vendor/Provider Name: {vendor_name}\n\
         \n\
         {scope}\n\
         \n\
         Remember:\n\
         - NO signature sections or signature lines (signing is handled separately)\n\
         - Use today's date, {today}\n\
         - NO tables or complex formatting\n\
         - Use simple HTML tags only: <h2> headings, <p> paragraphs, <ul><li> bullet points\n\
         - Keep whitespace between lines to a minimum",
        vendor_type = request.vendor_type,
        client = request.client_name,
        date = request.event_date.format("%Y-%m-%d"),
        venue = if request.venue.is_empty() { "TBD" } else { request.venue.as_str() },
        service = request.service_package,
        amount = request.amount,
        vendor_name = request.vendor_name,
        today = today.format("%B %-d, %Y"),
    )
}

// ---------------------------------------------------------------------------
// Output cleanup and sanitation
// ---------------------------------------------------------------------------

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*```[a-zA-Z]*\s*$").expect("valid regex"));

static DANGEROUS_ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<(script|style|iframe|object|embed)\b[^>]*>.*?</(script|style|iframe|object|embed)\s*>",
    )
    .expect("valid regex")
});

static DANGEROUS_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(script|style|iframe|object|embed)\b[^>]*>").expect("valid regex")
});

static EVENT_HANDLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<[^>]*?)\s+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#)
        .expect("valid regex")
});

static JAVASCRIPT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(href|src)\s*=\s*(["']?)\s*javascript:"#).expect("valid regex")
});

/// Remove markdown code fences some models wrap around HTML.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE_RE.replace_all(raw, "").trim().to_string()
}

/// Strip active content from producer-supplied HTML before it is stored.
///
/// Removes script-like elements, inline event handlers and `javascript:`
/// URLs. Everything else passes through untouched. Passes repeat until the
/// output is stable, so removing one tag can never splice another together.
pub fn sanitize_html(html: &str) -> String {
    let mut out = sanitize_pass(html);
    loop {
        let next = sanitize_pass(&out);
        if next == out {
            return out;
        }
        out = next;
    }
}

/// One sweep of every rule. Each replacement is shorter than its match, so
/// repeated sweeps terminate.
fn sanitize_pass(html: &str) -> String {
    let out = DANGEROUS_ELEMENT_RE.replace_all(html, "");
    let out = DANGEROUS_TAG_RE.replace_all(&out, "");
    let out = EVENT_HANDLER_RE.replace_all(&out, "$1");
    JAVASCRIPT_URL_RE
        .replace_all(&out, "${1}=${2}#")
        .into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;

    struct Fixed(Mutex<Option<Result<String, GenerationError>>>);

    impl Fixed {
        fn new(result: Result<String, GenerationError>) -> Self {
            Self(Mutex::new(Some(result)))
        }
    }

    #[async_trait]
    impl ContentGenerator for Fixed {
        async fn generate(&self, _request: &ContentRequest) -> Result<String, GenerationError> {
            self.0.lock().unwrap().take().expect("called once")
        }
    }

    fn request(vendor_type: VendorType) -> ContentRequest {
        ContentRequest {
            vendor_type,
            vendor_name: "Sarah Johnson".to_string(),
            client_name: "Alice & Bob".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            venue: String::new(),
            service_package: "Full Day".to_string(),
            amount: Amount::parse("2500").unwrap(),
            section: None,
        }
    }

    #[tokio::test]
    async fn upstream_failure_returns_vendor_fallback_verbatim() {
        let generator = Fixed::new(Err(GenerationError::Upstream {
            status: 503,
            body: "overloaded".to_string(),
        }));
        let out = generate_or_fallback(&generator, &request(VendorType::Caterer)).await;
        assert_eq!(out.content, CATERER_FALLBACK);
        assert_eq!(out.source, ContentSource::Fallback);
        assert_matches!(out.failure, Some(GenerationError::Upstream { status: 503, .. }));
    }

    #[tokio::test]
    async fn blank_output_is_treated_as_failure() {
        let generator = Fixed::new(Ok("```html\n\n```".to_string()));
        let out = generate_or_fallback(&generator, &request(VendorType::Florist)).await;
        assert_eq!(out.content, FLORIST_FALLBACK);
        assert_matches!(out.failure, Some(GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn generated_output_is_cleaned_and_kept() {
        let generator = Fixed::new(Ok("```html\n<h2>Agreement</h2>\n```".to_string()));
        let out = generate_or_fallback(&generator, &request(VendorType::Photographer)).await;
        assert_eq!(out.content, "<h2>Agreement</h2>");
        assert_eq!(out.source, ContentSource::Generated);
        assert!(out.failure.is_none());
    }

    #[tokio::test]
    async fn disabled_generator_always_falls_back() {
        let out = generate_or_fallback(&DisabledGenerator, &request(VendorType::Photographer)).await;
        assert_eq!(out.content, PHOTOGRAPHER_FALLBACK);
        assert_matches!(out.failure, Some(GenerationError::Unavailable));
    }

    #[test]
    fn prompt_mentions_facts_and_scope() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let prompt = build_user_prompt(&request(VendorType::Caterer), today);
        assert!(prompt.contains("for a caterer"));
        assert!(prompt.contains("Client: Alice & Bob"));
        assert!(prompt.contains("Amount: $2500.00"));
        assert!(prompt.contains("Venue: TBD"));
        assert!(prompt.contains("January 15, 2025"));
        assert!(prompt.contains("Include all standard sections"));

        let mut focused = request(VendorType::Caterer);
        focused.section = Some("Cancellation Policy".to_string());
        let prompt = build_user_prompt(&focused, today);
        assert!(prompt.contains("Focus specifically on the Cancellation Policy section."));
    }

    #[test]
    fn sanitize_strips_scripts_and_handlers() {
        let dirty = r#"<p onclick="steal()" class="x">Hi</p><script>alert(1)</script><a href="javascript:alert(2)">x</a>"#;
        let clean = sanitize_html(dirty);
        assert_eq!(clean, r##"<p class="x">Hi</p><a href="#alert(2)">x</a>"##);
    }

    #[test]
    fn sanitize_removes_multiple_handlers_on_one_tag() {
        let clean = sanitize_html(r#"<img src="a.png" onerror="x()" onload='y()'>"#);
        assert_eq!(clean, r#"<img src="a.png">"#);
    }

    #[test]
    fn sanitize_does_not_reassemble_nested_tags() {
        let clean = sanitize_html("<scr<embed>ipt>alert(1)</scr<embed>ipt>");
        assert!(!clean.to_lowercase().contains("<script"));
        assert!(!clean.contains("alert(1)"));

        let clean = sanitize_html("<ifr<script></script>ame src=x></ifr<style></style>ame>");
        assert!(!clean.to_lowercase().contains("<iframe"));
    }

    #[test]
    fn sanitize_does_not_reassemble_nested_handlers() {
        let clean = sanitize_html(r#"<img src="a.png" o onclick="x()"nerror="y()">"#);
        assert!(!clean.contains("onerror"));
        assert!(!clean.contains("onclick"));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let dirty = "<p onclick='a()'>Hi</p><scr<script>x</script>ipt>b()</script>";
        let once = sanitize_html(dirty);
        assert_eq!(sanitize_html(&once), once);
    }

    #[test]
    fn sanitize_leaves_plain_markup_alone() {
        assert_eq!(sanitize_html(CATERER_FALLBACK), CATERER_FALLBACK);
        assert_eq!(
            sanitize_html("<p>We are online = always</p>"),
            "<p>We are online = always</p>"
        );
    }
}
