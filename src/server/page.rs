//! Server-rendered form and preview page.

use crate::{
    config::PaymentConfig,
    models::{catalog, PackageTier, DEFAULT_STYLE},
    session::SessionState,
};
use std::fmt::Write;

pub const WATERMARK_TEXT: &str = "MarkitBrand AI";

/// What the user typed, echoed back into the form after a submit.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub brand_name: String,
    pub tagline: String,
    pub style: String,
    pub package_tier: PackageTier,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            brand_name: String::new(),
            tagline: String::new(),
            style: DEFAULT_STYLE.to_string(),
            package_tier: PackageTier::default(),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(form: &FormValues, state: &SessionState, payment: &PaymentConfig) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(HEAD);
    html.push_str(
        "<header><h1>MarkitBrand AI</h1>\
         <p>Professional marketing visuals for your brand, generated in seconds.</p></header>\
         <main>",
    );
    render_form(&mut html, form, state);
    html.push_str("<section class=\"column\">");
    render_preview(&mut html, state);
    if let SessionState::Success {
        order_id,
        package_tier,
        ..
    } = state
    {
        render_payment(&mut html, order_id.as_str(), *package_tier, payment);
    }
    if let SessionState::Failed { message } = state {
        let _ = write!(
            html,
            "<div class=\"error\"><p><strong>Generation Failed:</strong> {}</p></div>",
            escape_html(message)
        );
    }
    html.push_str("</section></main>");
    html.push_str(SCRIPT);
    html.push_str("</body></html>");
    html
}

fn render_form(html: &mut String, form: &FormValues, state: &SessionState) {
    let submitting = matches!(state, SessionState::Submitting);

    html.push_str(
        "<form class=\"column\" method=\"post\" action=\"/generate\" \
         enctype=\"multipart/form-data\" onsubmit=\"return markitSubmit(this)\">",
    );
    let _ = write!(
        html,
        "<label for=\"brand_name\">Business / Brand Name</label>\
         <input id=\"brand_name\" name=\"brand_name\" placeholder=\"e.g., QuantumLeap\" value=\"{}\" required>\
         <label for=\"tagline\">Tagline or Key Text</label>\
         <input id=\"tagline\" name=\"tagline\" placeholder=\"e.g., Innovating Tomorrow\" value=\"{}\" required>\
         <label for=\"logo\">Logo Upload (Optional)</label>\
         <input id=\"logo\" name=\"logo\" type=\"file\" accept=\"image/png, image/jpeg, image/webp, image/gif\">\
         <label for=\"style\">Preferred Colors / Style</label>\
         <textarea id=\"style\" name=\"style\" rows=\"3\" \
         placeholder=\"e.g., vibrant blues and purples, minimalist, futuristic\">{}</textarea>",
        escape_html(&form.brand_name),
        escape_html(&form.tagline),
        escape_html(&form.style)
    );

    html.push_str("<fieldset class=\"packages\"><legend>Choose Your Package</legend>");
    for package in catalog::packages() {
        let checked = if package.id == form.package_tier {
            " checked"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<label class=\"package\"><input type=\"radio\" name=\"package_tier\" value=\"{}\"{}>\
             <span class=\"name\">{}</span> <span class=\"price\">{}</span>\
             <span class=\"description\">{}</span></label>",
            package.id,
            checked,
            escape_html(package.name),
            escape_html(package.price),
            escape_html(package.description)
        );
    }
    html.push_str("</fieldset>");

    let _ = write!(
        html,
        "<button type=\"submit\"{}>{}</button></form>",
        if submitting { " disabled" } else { "" },
        if submitting {
            "Generating..."
        } else {
            "Generate Previews"
        }
    );
}

fn render_preview(html: &mut String, state: &SessionState) {
    html.push_str("<div class=\"preview\">");
    match state {
        SessionState::Submitting => html.push_str(
            "<p>Generating your brand visuals...</p><p class=\"muted\">This may take a moment.</p>",
        ),
        SessionState::Success { images, .. } if !images.is_empty() => {
            html.push_str("<div class=\"grid\">");
            for (index, src) in images.iter().enumerate() {
                let _ = write!(
                    html,
                    "<div class=\"card\"><img src=\"{}\" alt=\"Generated Image {}\">\
                     <div class=\"watermark\"><span>{}</span></div></div>",
                    escape_html(src),
                    index + 1,
                    WATERMARK_TEXT
                );
            }
            html.push_str("</div>");
        }
        _ => html.push_str("<p class=\"muted\">Your generated images will appear here.</p>"),
    }
    html.push_str("</div>");
}

fn render_payment(html: &mut String, order_id: &str, tier: PackageTier, payment: &PaymentConfig) {
    let price = catalog::find_package(tier).map(|p| p.price).unwrap_or("");
    let _ = write!(
        html,
        "<div class=\"order\"><h3>Complete Your Order</h3>\
         <p class=\"muted\">Follow these steps to receive your images without the watermark.</p>\
         <ol>\
         <li>Send <strong>{price}</strong> to <strong>{cashtag}</strong> using Cash App. \
         <a class=\"pay\" href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">Pay with Cash App</a></li>\
         <li>You <strong>must include</strong> this unique Order ID in the payment note: \
         <code id=\"order-id\">{order_id}</code> \
         <button type=\"button\" onclick=\"markitCopy(this)\">Copy</button></li>\
         <li>Once payment is verified, your final images will be delivered via email. \
         For support, contact <a href=\"mailto:{email}\">{email}</a>.</li>\
         </ol></div>",
        price = escape_html(price),
        cashtag = escape_html(&payment.cashtag),
        url = escape_html(&payment.payment_url()),
        order_id = escape_html(order_id),
        email = escape_html(&payment.support_email),
    );
}

const HEAD: &str = "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>MarkitBrand AI</title><style>\
body{margin:0;font-family:sans-serif;background:#111827;color:#e5e7eb}\
header{text-align:center;padding:2rem}\
main{display:grid;grid-template-columns:repeat(auto-fit,minmax(320px,1fr));gap:3rem;max-width:80rem;margin:0 auto;padding:2rem}\
.column{display:flex;flex-direction:column;gap:1rem}\
input,textarea{background:#1f2937;color:#fff;border:1px solid #4b5563;border-radius:.5rem;padding:.75rem}\
.package{display:block;border:1px solid #4b5563;border-radius:.5rem;padding:.75rem;margin:.5rem 0}\
.price{color:#c084fc;font-weight:bold}.description,.muted{color:#9ca3af;font-size:.9rem}\
button{background:#9333ea;color:#fff;border:0;border-radius:.5rem;padding:1rem;font-weight:bold}\
button:disabled{opacity:.5}\
.preview{background:#1f2937;border-radius:.5rem;padding:1.5rem;min-height:400px}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(180px,1fr));gap:1rem}\
.card{position:relative;aspect-ratio:1;overflow:hidden;border-radius:.5rem}\
.card img{width:100%;height:100%;object-fit:cover}\
.watermark{position:absolute;inset:0;background:rgba(0,0,0,.5);display:flex;align-items:center;justify-content:center;pointer-events:none}\
.watermark span{color:#fff;font-size:1.5rem;font-weight:bold;opacity:.75;transform:rotate(-12deg);user-select:none}\
.order{border:1px solid #a855f7;border-radius:.5rem;padding:1.5rem}\
.pay{display:block;margin-top:.5rem;background:#22c55e;color:#fff;text-align:center;padding:.5rem;border-radius:.5rem}\
.error{background:#7f1d1d;border:1px solid #b91c1c;color:#fca5a5;padding:.75rem;border-radius:.5rem;text-align:center}\
</style></head><body>";

const SCRIPT: &str = "<script>\
function markitSubmit(form){var b=form.querySelector('button[type=submit]');\
if(b.disabled){return false;}b.disabled=true;b.textContent='Generating...';return true;}\
function markitCopy(btn){var id=document.getElementById('order-id').textContent;\
navigator.clipboard.writeText(id);btn.textContent='Copied!';\
setTimeout(function(){btn.textContent='Copy';},2000);}\
</script>";
