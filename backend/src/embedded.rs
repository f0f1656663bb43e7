use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use mime_guess::from_path;

static STATIC_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const INDEX: &str = "index.html";

pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    respond(&STATIC_DIR, req.path())
}

pub fn respond(dir: &Dir<'_>, request_path: &str) -> HttpResponse {
    let path = request_path.trim_start_matches('/');
    let file_path = if path.is_empty() { INDEX } else { path };

    match dir.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match dir.get_file(INDEX) {
            Some(index) => {
                log::debug!("no embedded file for {}, serving {}", request_path, INDEX);
                HttpResponse::Ok()
                    .content_type("text/html; charset=utf-8")
                    .body(index.contents().to_vec())
            }
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::http::StatusCode;

    static SITE: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/tests/fixtures/site");
    static EMPTY: Dir<'static> = Dir::new("", &[]);

    async fn body_text(resp: HttpResponse) -> String {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn content_type(resp: &HttpResponse) -> String {
        resp.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[actix_web::test]
    async fn root_serves_index() {
        let resp = respond(&SITE, "/");
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(content_type(&resp).starts_with("text/html"));
        assert!(body_text(resp).await.contains("fixture index"));
    }

    #[actix_web::test]
    async fn assets_get_their_mime_type() {
        let resp = respond(&SITE, "/assets/app.js");
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(content_type(&resp).contains("javascript"));
        assert_eq!(body_text(resp).await.trim(), "console.log(\"fixture\");");
    }

    #[actix_web::test]
    async fn unknown_paths_fall_back_to_index() {
        let resp = respond(&SITE, "/history/42");
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("fixture index"));
    }

    #[actix_web::test]
    async fn missing_build_answers_not_found() {
        let resp = respond(&EMPTY, "/");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
