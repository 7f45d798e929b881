use crate::{
    config::PaymentConfig,
    encoding,
    error::{MarkitError, Result},
    models::{catalog, GenerationParams, Logo, PackageOption, PackageTier},
    order::OrderId,
    server::{
        page::{self, FormValues},
        AppState,
    },
    session::{Session, SessionState},
};
use actix_multipart::Multipart;
use actix_web::{http::header::ContentType, web, HttpResponse};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const MAX_LOGO_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub brand_name: String,
    pub tagline: String,
    #[serde(default)]
    pub style: Option<String>,
    pub package_tier: String,
    #[serde(default)]
    pub logo: Option<Logo>,
}

impl GenerateRequest {
    pub fn into_params(self) -> Result<GenerationParams> {
        let tier = self.package_tier.parse::<PackageTier>()?;
        let mut params = GenerationParams::new(self.brand_name, self.tagline).with_package(tier);
        if let Some(style) = self.style.filter(|s| !s.trim().is_empty()) {
            params = params.with_style(style);
        }
        if let Some(logo) = self.logo {
            params = params.with_optional_logo(Logo::new(logo.data, logo.mime_type));
        }
        params.validate()?;
        Ok(params)
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentInstructions {
    pub amount: &'static str,
    pub cashtag: String,
    pub payment_url: String,
    pub support_email: String,
    pub note: String,
}

impl PaymentInstructions {
    pub fn new(payment: &PaymentConfig, package: &'static PackageOption, order_id: &OrderId) -> Self {
        Self {
            amount: package.price,
            cashtag: payment.cashtag.clone(),
            payment_url: payment.payment_url(),
            support_email: payment.support_email.clone(),
            note: format!("Include order ID {} in the payment note.", order_id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub order_id: OrderId,
    pub package: &'static PackageOption,
    pub images: Vec<String>,
    pub payment: PaymentInstructions,
}

pub fn error_response(err: &MarkitError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    if err.is_user_error() {
        return HttpResponse::BadRequest().json(body);
    }
    match err {
        MarkitError::VariationFailed { .. }
        | MarkitError::RequestError(_)
        | MarkitError::ResponseError(_)
        | MarkitError::NoImageData => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn list_packages() -> HttpResponse {
    HttpResponse::Ok().json(catalog::packages())
}

pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    html(page::render(
        &FormValues::default(),
        &SessionState::Idle,
        &state.payment,
    ))
}

pub async fn generate_json(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> HttpResponse {
    let params = match body.into_inner().into_params() {
        Ok(params) => params,
        Err(e) => {
            log::warn!("Rejected generation request: {}", e);
            return error_response(&e);
        }
    };

    match state.generator.generate(&params).await {
        Ok(result) => {
            let order_id = OrderId::generate();
            let package = match catalog::find_package(result.package_tier) {
                Ok(package) => package,
                Err(e) => return error_response(&e),
            };
            HttpResponse::Ok().json(GenerateResponse {
                payment: PaymentInstructions::new(&state.payment, package, &order_id),
                order_id,
                package,
                images: result.images,
            })
        }
        Err(e) => error_response(&e),
    }
}

pub async fn generate_form(state: web::Data<AppState>, payload: Multipart) -> HttpResponse {
    let mut form = FormValues::default();
    let mut session = Session::new();

    let rendered = match read_form(payload, &mut form).await {
        Ok(params) => match session.run(&state.generator, &params).await {
            Ok(outcome) => page::render(&form, outcome, &state.payment),
            Err(e) => failed_page(&form, &e, &state.payment),
        },
        Err(e) => failed_page(&form, &e, &state.payment),
    };
    html(rendered)
}

fn failed_page(form: &FormValues, err: &MarkitError, payment: &PaymentConfig) -> String {
    let state = SessionState::Failed {
        message: err.to_string(),
    };
    page::render(form, &state, payment)
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Collects the multipart form into `form` and returns the parameters it describes.
/// `form` keeps whatever was read even when this fails, so the page can echo it back.
async fn read_form(mut payload: Multipart, form: &mut FormValues) -> Result<GenerationParams> {
    let mut package_tier: Option<String> = None;
    let mut logo: Option<Logo> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| MarkitError::InvalidInput(format!("Invalid form data: {}", e)))?;

        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .filter(|mime| mime != "application/octet-stream");
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes = chunk
                .map_err(|e| MarkitError::InvalidInput(format!("Error reading upload: {}", e)))?;
            if data.len() + bytes.len() > MAX_LOGO_BYTES {
                return Err(MarkitError::InvalidInput(
                    "uploaded file exceeds the 10 MB limit".into(),
                ));
            }
            data.extend_from_slice(&bytes);
        }

        match name.as_str() {
            "brand_name" => form.brand_name = String::from_utf8_lossy(&data).into_owned(),
            "tagline" => form.tagline = String::from_utf8_lossy(&data).into_owned(),
            "style" => form.style = String::from_utf8_lossy(&data).into_owned(),
            "package_tier" => package_tier = Some(String::from_utf8_lossy(&data).into_owned()),
            "logo" if !data.is_empty() => {
                let mime_type = content_type.or_else(|| {
                    filename
                        .as_deref()
                        .and_then(|name| encoding::guess_mime_type(name))
                        .map(str::to_string)
                });
                logo = match mime_type {
                    Some(mime_type) => Logo::from_bytes(&data, mime_type),
                    None => {
                        log::warn!("Ignoring logo upload with unknown type");
                        None
                    }
                };
            }
            _ => {}
        }
    }

    if let Some(tier) = package_tier {
        form.package_tier = tier.parse()?;
    }

    Ok(
        GenerationParams::new(form.brand_name.clone(), form.tagline.clone())
            .with_style(form.style.clone())
            .with_package(form.package_tier)
            .with_optional_logo(logo),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gemini::ImageBackend,
        generator::MarketingGenerator,
        models::{GeneratedImage, RequestPart},
        server::routes,
    };
    use actix_web::{http::header, http::StatusCode, test, App};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const BOUNDARY: &str = "markitboundary";

    #[derive(Default)]
    struct StubBackend {
        calls: AtomicUsize,
        with_logo: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ImageBackend for StubBackend {
        async fn generate_image(&self, parts: Vec<RequestPart>) -> Result<GeneratedImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if parts.first().map(|p| p.is_image()).unwrap_or(false) {
                self.with_logo.fetch_add(1, Ordering::SeqCst);
            }
            if self.fail {
                return Err(MarkitError::NoImageData);
            }
            Ok(GeneratedImage {
                mime_type: "image/png".into(),
                data: "iVBOR".into(),
            })
        }
    }

    fn state_with(backend: Arc<StubBackend>) -> web::Data<AppState> {
        web::Data::new(AppState::new(
            MarketingGenerator::new(backend),
            PaymentConfig::default(),
        ))
    }

    fn multipart_body(fields: &[(&str, &str)], logo: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, mime, bytes)) = logo {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"logo\"; filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/generate")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn packages_are_listed_in_order() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(StubBackend::default())))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/packages").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let counts: Vec<u64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["image_count"].as_u64().unwrap())
            .collect();
        assert_eq!(counts, vec![1, 3, 5]);
        assert_eq!(body[1]["id"], "Pro");
        assert_eq!(body[1]["price"], "$25");
    }

    #[actix_web::test]
    async fn json_generation_returns_order_and_images() {
        let backend = Arc::new(StubBackend::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(backend.clone()))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({
                "brand_name": "QuantumLeap",
                "tagline": "Innovating Tomorrow",
                "style": "vibrant blues",
                "package_tier": "Pro",
                "logo": {"data": "data:image/png;base64,AAAA", "mime_type": "image/png"}
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["images"].as_array().unwrap().len(), 3);
        assert!(body["order_id"].as_str().unwrap().starts_with("MB-"));
        assert_eq!(body["package"]["name"], "Pro");
        assert_eq!(body["payment"]["amount"], "$25");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
        assert_eq!(backend.with_logo.load(Ordering::SeqCst), 3);
    }

    #[actix_web::test]
    async fn unknown_package_is_a_bad_request() {
        let backend = Arc::new(StubBackend::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(backend.clone()))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({
                "brand_name": "QuantumLeap",
                "tagline": "Innovating Tomorrow",
                "package_tier": "Platinum"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Invalid package"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn generation_failure_is_a_bad_gateway() {
        let backend = Arc::new(StubBackend {
            fail: true,
            ..Default::default()
        });
        let app = test::init_service(App::new().app_data(state_with(backend)).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({
                "brand_name": "QuantumLeap",
                "tagline": "Innovating Tomorrow",
                "package_tier": "Basic"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Failed to generate image variation 1");
    }

    #[actix_web::test]
    async fn index_serves_the_form() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(StubBackend::default())))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("Generate Previews"));
    }

    #[actix_web::test]
    async fn form_submission_renders_watermarked_previews() {
        let backend = Arc::new(StubBackend::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(backend.clone()))
                .configure(routes),
        )
        .await;

        let body = multipart_body(
            &[
                ("brand_name", "QuantumLeap"),
                ("tagline", "Innovating Tomorrow"),
                ("style", "vibrant blues"),
                ("package_tier", "Pro"),
            ],
            Some(("logo.png", "image/png", b"\x89PNG fake")),
        );
        let html = test::call_and_read_body(&app, multipart_request(body).to_request()).await;
        let html = String::from_utf8(html.to_vec()).unwrap();

        assert_eq!(html.matches("class=\"watermark\"").count(), 3);
        assert!(html.contains("Complete Your Order"));
        assert!(html.contains("value=\"QuantumLeap\""));
        assert_eq!(backend.with_logo.load(Ordering::SeqCst), 3);
    }

    #[actix_web::test]
    async fn empty_json_logo_is_not_sent() {
        let backend = Arc::new(StubBackend::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(backend.clone()))
                .configure(routes),
        )
        .await;

        for logo in [
            json!({"data": "", "mime_type": ""}),
            json!({"data": "data:image/png;base64,", "mime_type": "image/png"}),
            json!({"data": "AAAA", "mime_type": ""}),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/generate")
                .set_json(json!({
                    "brand_name": "QuantumLeap",
                    "tagline": "Innovating Tomorrow",
                    "package_tier": "Basic",
                    "logo": logo
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
        assert_eq!(backend.with_logo.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn logo_of_unknown_type_is_dropped() {
        let backend = Arc::new(StubBackend::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(backend.clone()))
                .configure(routes),
        )
        .await;

        let body = multipart_body(
            &[
                ("brand_name", "QuantumLeap"),
                ("tagline", "Innovating Tomorrow"),
                ("package_tier", "Pro"),
            ],
            Some(("logo.bin", "application/octet-stream", b"\x00\x01binary")),
        );
        let html = test::call_and_read_body(&app, multipart_request(body).to_request()).await;
        let html = String::from_utf8(html.to_vec()).unwrap();

        assert_eq!(html.matches("class=\"watermark\"").count(), 3);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
        assert_eq!(backend.with_logo.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn logo_type_falls_back_to_file_extension() {
        let backend = Arc::new(StubBackend::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(backend.clone()))
                .configure(routes),
        )
        .await;

        let body = multipart_body(
            &[
                ("brand_name", "QuantumLeap"),
                ("tagline", "Innovating Tomorrow"),
                ("package_tier", "Basic"),
            ],
            Some(("logo.webp", "application/octet-stream", b"RIFF fake")),
        );
        test::call_and_read_body(&app, multipart_request(body).to_request()).await;

        assert_eq!(backend.with_logo.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn form_without_tagline_shows_an_error() {
        let backend = Arc::new(StubBackend::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(backend.clone()))
                .configure(routes),
        )
        .await;

        let body = multipart_body(&[("brand_name", "QuantumLeap"), ("tagline", "")], None);
        let html = test::call_and_read_body(&app, multipart_request(body).to_request()).await;
        let html = String::from_utf8(html.to_vec()).unwrap();

        assert!(html.contains("Generation Failed:"));
        assert!(html.contains("tagline is required"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }
}
