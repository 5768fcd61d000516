//! End-to-end harvest pipeline tests against a local fake portal.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use tokio::sync::mpsc;

use cumponidori::models::Project;
use cumponidori::portal::{PortalClient, PortalConfig};
use cumponidori::services::harvest::{HarvestConfig, HarvestEvent, HarvestService};

/// Serve a router on an ephemeral local port, returning its base URL.
async fn spawn_portal(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn doc_row(name: &str, href: &str) -> String {
    format!(
        r#"<tr><td>1</td><td>{name}</td><td></td><td></td><td></td><td></td><td></td><td></td>
        <td><a title="Scarica il documento" href="{href}">scarica</a></td></tr>"#
    )
}

fn documentation_page(rows: &str, label: &str) -> Html<String> {
    Html(format!(
        r#"<html><body>
        <table class="Documentazione">
        <tr><th></th><th>Nome file</th><th></th><th></th><th></th><th></th><th></th><th></th><th></th></tr>
        {rows}
        </table>
        <div class="pagination"><span class="etichettaRicerca">{label}</span></div>
        </body></html>"#
    ))
}

/// Fake portal: one detail page pointing at two procedures (one of them
/// linked twice), a two-page and a one-page document listing, and a download
/// endpoint where one document is broken.
fn fake_portal() -> Router {
    Router::new()
        .route(
            "/detail/1234",
            get(|| async {
                Html(
                    r#"<html><body>
                    <a href="/it-IT/Oggetti/Documentazione/a">Documentazione</a>
                    <a href="/it-IT/Oggetti/Documentazione/a">Documentazione (bis)</a>
                    <a href="/it-IT/Oggetti/Documentazione/b">Altra procedura</a>
                    </body></html>"#,
                )
            }),
        )
        .route(
            "/it-IT/Oggetti/Documentazione/a",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let page: u32 = params
                    .get("pagina")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(1);
                documentation_page(
                    &doc_row(
                        &format!("a{page}.pdf"),
                        &format!("/File/Documento/a{page}"),
                    ),
                    &format!("Pagina {page} di 2"),
                )
            }),
        )
        .route(
            "/it-IT/Oggetti/Documentazione/b",
            get(|| async {
                let rows = [
                    doc_row("b1.pdf", "/File/Documento/b1"),
                    doc_row("b2.pdf", "/File/Documento/broken"),
                ]
                .join("\n");
                documentation_page(&rows, "Pagina 1 di 1")
            }),
        )
        .route(
            "/File/Documento/:id",
            get(|Path(id): Path<String>| async move {
                if id == "broken" {
                    (StatusCode::NOT_FOUND, "gone").into_response()
                } else {
                    (
                        [(header::CONTENT_TYPE, "application/pdf")],
                        format!("%PDF {id}"),
                    )
                        .into_response()
                }
            }),
        )
}

fn project(base: &str) -> Project {
    Project {
        id: "1234".to_string(),
        title: "Parco eolico".to_string(),
        proponent: "Acme SpA".to_string(),
        status: "Valutazione Impatto Ambientale".to_string(),
        url: format!("{base}/detail/1234"),
        doc_url: String::new(),
    }
}

async fn run_harvest(
    base: &str,
    out_dir: std::path::PathBuf,
    projects: &[Project],
) -> (cumponidori::services::harvest::HarvestReport, Vec<HarvestEvent>) {
    let client = PortalClient::new(PortalConfig::for_base_url(base)).unwrap();
    let service = HarvestService::new(
        client,
        HarvestConfig {
            output_dir: out_dir,
            download_delay_ms: 0,
        },
    );

    let (event_tx, mut event_rx) = mpsc::channel(64);
    let collector = tokio::spawn(async move {
        let mut events = Vec::new();
        while let Some(event) = event_rx.recv().await {
            events.push(event);
        }
        events
    });

    let report = service.harvest(projects, event_tx).await.unwrap();
    let events = collector.await.unwrap();
    (report, events)
}

#[tokio::test]
async fn harvest_downloads_all_documents_and_skips_failures() {
    let base = spawn_portal(fake_portal()).await;
    let dir = tempfile::tempdir().unwrap();

    let (report, events) = run_harvest(&base, dir.path().to_path_buf(), &[project(&base)]).await;

    // procedure "a" is deduplicated, so: 2 docs from a + 2 from b planned,
    // one of which is broken
    assert_eq!(report.projects, 1);
    assert_eq!(report.procedures, 2);
    assert_eq!(report.downloaded, 3);
    assert_eq!(report.failed, 1);

    assert!(events
        .iter()
        .any(|e| matches!(e, HarvestEvent::PlanReady { total_documents: 4 })));
    assert!(events
        .iter()
        .any(|e| matches!(e, HarvestEvent::DocumentFailed { .. })));

    for name in ["1234_a1.pdf", "1234_a2.pdf", "1234_b1.pdf"] {
        let path = dir.path().join(name);
        assert!(path.exists(), "missing {name}");
    }
    assert_eq!(
        std::fs::read_to_string(dir.path().join("1234_a1.pdf")).unwrap(),
        "%PDF a1"
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
}

#[tokio::test]
async fn harvest_survives_a_failing_procedure() {
    // portal where one procedure listing 500s but the other works
    let portal = Router::new()
        .route(
            "/detail/1234",
            get(|| async {
                Html(
                    r#"<html><body>
                    <a href="/it-IT/Oggetti/Documentazione/dead">Documentazione</a>
                    <a href="/it-IT/Oggetti/Documentazione/live">Documentazione</a>
                    </body></html>"#,
                )
            }),
        )
        .route(
            "/it-IT/Oggetti/Documentazione/dead",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
        )
        .route(
            "/it-IT/Oggetti/Documentazione/live",
            get(|| async {
                documentation_page(&doc_row("ok.pdf", "/File/Documento/ok"), "Pagina 1 di 1")
            }),
        )
        .route(
            "/File/Documento/ok",
            get(|| async { ([(header::CONTENT_TYPE, "application/pdf")], "%PDF ok") }),
        );

    let base = spawn_portal(portal).await;
    let dir = tempfile::tempdir().unwrap();

    let (report, events) = run_harvest(&base, dir.path().to_path_buf(), &[project(&base)]).await;

    assert_eq!(report.procedures, 1);
    assert_eq!(report.downloaded, 1);
    assert_eq!(report.failed, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, HarvestEvent::ProcedureFailed { .. })));
    assert!(dir.path().join("1234_ok.pdf").exists());
}

#[tokio::test]
async fn harvest_skips_project_with_unreachable_detail_page() {
    let base = spawn_portal(Router::new()).await;
    let dir = tempfile::tempdir().unwrap();

    let (report, events) = run_harvest(&base, dir.path().to_path_buf(), &[project(&base)]).await;

    assert_eq!(report.projects, 0);
    assert_eq!(report.downloaded, 0);
    assert_eq!(report.failed, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, HarvestEvent::PlanReady { total_documents: 0 })));
}
