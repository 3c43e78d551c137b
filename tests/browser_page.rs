//! Browser tests for the interactive parts of the page: menu, lightbox and
//! inquiry validation.
//!
//! Run with: `cargo test --test browser_page -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("browser-page")
}

fn ensure_site_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let bin = env!("CARGO_BIN_EXE_rental-site");
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

        let output_dir = generated_dir();
        if output_dir.exists() {
            std::fs::remove_dir_all(&output_dir).expect("failed to clean output dir");
        }

        let status = Command::new(bin)
            .args([
                "build",
                "--source",
                root.join("fixtures/content").to_str().unwrap(),
                "--output",
                output_dir.to_str().unwrap(),
            ])
            .status()
            .expect("failed to run rental-site");
        assert!(status.success(), "site generation failed");
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((390, 844)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn load_index() -> Arc<Tab> {
    ensure_site_built();
    let tab = browser().new_tab().unwrap();
    let file = generated_dir().join("index.html");
    assert!(file.exists(), "missing: {}", file.display());

    tab.navigate_to(&format!("file://{}", file.display()))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab
}

fn eval(tab: &Tab, js: &str) -> serde_json::Value {
    tab.evaluate(js, false)
        .expect("failed to evaluate JS")
        .value
        .expect("no value returned")
}

fn hash(tab: &Tab) -> String {
    eval(tab, "location.hash").as_str().unwrap().to_string()
}

/// Poll `condition` until it is true or two seconds pass.
fn wait_for(tab: &Tab, condition: &str) -> bool {
    for _ in 0..40 {
        if eval(tab, condition).as_bool() == Some(true) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

/// Replace `window.fetch`. `response` is `"ok"`, `"fail"` or `"pending"`.
/// Every call is recorded in `window.sentInquiries`.
fn stub_fetch(tab: &Tab, response: &str) {
    eval(
        tab,
        &format!(
            r#"window.sentInquiries = [];
            window.fetch = function (url, options) {{
                window.sentInquiries.push({{ url: url, body: JSON.parse(options.body) }});
                if ('{response}' === 'pending') return new Promise(function () {{}});
                return Promise.resolve({{ ok: '{response}' === 'ok', status: '{response}' === 'ok' ? 200 : 400 }});
            }};
            true"#
        ),
    );
}

/// Fill every field and set the dates.
fn fill_form(tab: &Tab, email: &str, arrival: &str, departure: &str) {
    eval(
        tab,
        &format!(
            r#"(function () {{
                var f = document.querySelector('form.inquiry-form');
                f.elements['nombre'].value = 'Ana';
                f.elements['apellido'].value = 'Silva';
                f.elements['email'].value = '{email}';
                f.elements['telefono'].value = '';
                f.elements['fecha_llegada'].value = '{arrival}';
                f.elements['fecha_salida'].value = '{departure}';
                return true;
            }})()"#
        ),
    );
}

fn submit(tab: &Tab) {
    eval(tab, "document.querySelector('button.submit').click(); true");
}

fn text_of(tab: &Tab, selector: &str) -> String {
    eval(
        tab,
        &format!("document.querySelector('{selector}').textContent"),
    )
    .as_str()
    .unwrap_or_default()
    .to_string()
}

fn field_value(tab: &Tab, name: &str) -> String {
    eval(
        tab,
        &format!("document.querySelector('form.inquiry-form').elements['{name}'].value"),
    )
    .as_str()
    .unwrap_or_default()
    .to_string()
}

fn sent_count(tab: &Tab) -> u64 {
    eval(tab, "window.sentInquiries.length").as_u64().unwrap()
}

fn press(tab: &Tab, key: &str) {
    eval(
        tab,
        &format!(
            "document.dispatchEvent(new KeyboardEvent('keydown', {{ key: '{key}' }})); true"
        ),
    );
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn menu_closes_when_link_followed() {
    let tab = load_index();
    eval(&tab, "document.getElementById('nav-toggle').checked = true; true");
    eval(&tab, "document.querySelector('.nav-link').click(); true");
    let checked = eval(&tab, "document.getElementById('nav-toggle').checked");
    assert_eq!(checked.as_bool(), Some(false));
}

// ---------------------------------------------------------------------------
// Lightbox
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn lightbox_arrow_keys_wrap() {
    let tab = load_index();
    eval(&tab, "location.hash = '#photo-1'; true");
    press(&tab, "ArrowLeft");
    assert_eq!(hash(&tab), "#photo-9");
    press(&tab, "ArrowRight");
    assert_eq!(hash(&tab), "#photo-1");
}

#[test]
#[ignore]
fn lightbox_escape_returns_to_gallery() {
    let tab = load_index();
    eval(&tab, "location.hash = '#photo-4'; true");
    let shown = eval(
        &tab,
        "getComputedStyle(document.getElementById('photo-4')).display",
    );
    assert_eq!(shown.as_str(), Some("flex"));

    press(&tab, "Escape");
    assert_eq!(hash(&tab), "#gallery");
}

// ---------------------------------------------------------------------------
// Inquiry form
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn empty_submit_shows_field_messages() {
    let tab = load_index();
    eval(&tab, "document.querySelector('button.submit').click(); true");
    let message = eval(
        &tab,
        "document.querySelector('[data-error-for=\"first-name\"]').textContent",
    );
    assert_eq!(message.as_str(), Some("El nombre es requerido"));
    let dates = eval(
        &tab,
        "document.querySelector('[data-error-for=\"dates\"]').textContent",
    );
    assert_eq!(dates.as_str(), Some("Ambas fechas son requeridas"));
}

#[test]
#[ignore]
fn invalid_email_is_reported_and_not_sent() {
    let tab = load_index();
    stub_fetch(&tab, "ok");
    fill_form(&tab, "ana@example", "2025-01-05", "2025-01-12");
    submit(&tab);

    assert_eq!(text_of(&tab, "[data-error-for=\"email\"]"), "Email inválido");
    assert_eq!(text_of(&tab, "[data-error-for=\"first-name\"]"), "");
    assert_eq!(sent_count(&tab), 0);
}

#[test]
#[ignore]
fn reversed_dates_are_reported_and_not_sent() {
    let tab = load_index();
    stub_fetch(&tab, "ok");
    fill_form(&tab, "ana@example.com", "2025-01-12", "2025-01-05");
    submit(&tab);

    assert_eq!(
        text_of(&tab, "[data-error-for=\"dates\"]"),
        "La fecha de salida no puede ser anterior a la de llegada"
    );
    assert_eq!(sent_count(&tab), 0);
}

#[test]
#[ignore]
fn arrival_sets_departure_minimum() {
    let tab = load_index();
    eval(
        &tab,
        r#"(function () {
            var f = document.querySelector('form.inquiry-form');
            f.elements['fecha_llegada'].value = '2025-01-05';
            f.elements['fecha_llegada'].dispatchEvent(new Event('change'));
            return true;
        })()"#,
    );
    let min = eval(
        &tab,
        "document.querySelector('form.inquiry-form').elements['fecha_salida'].min",
    );
    assert_eq!(min.as_str(), Some("2025-01-05"));
}

#[test]
#[ignore]
fn button_is_disabled_while_sending() {
    let tab = load_index();
    stub_fetch(&tab, "pending");
    fill_form(&tab, "ana@example.com", "2025-01-05", "2025-01-12");
    submit(&tab);

    let disabled = eval(&tab, "document.querySelector('button.submit').disabled");
    assert_eq!(disabled.as_bool(), Some(true));
    let label = eval(&tab, "document.querySelector('form.inquiry-form').dataset.sendingLabel");
    assert_eq!(text_of(&tab, "button.submit"), label.as_str().unwrap());

    // A second click while in flight does not send again.
    submit(&tab);
    assert_eq!(sent_count(&tab), 1);
}

#[test]
#[ignore]
fn successful_send_resets_form() {
    let tab = load_index();
    stub_fetch(&tab, "ok");
    fill_form(&tab, "ana@example.com", "2025-01-05", "2025-01-12");
    submit(&tab);

    assert!(wait_for(
        &tab,
        "document.querySelector('.form-notice').textContent.length > 0"
    ));
    assert_eq!(
        text_of(&tab, ".form-notice"),
        "¡Consulta enviada con éxito! Te contactaremos pronto."
    );
    for name in ["nombre", "apellido", "email", "fecha_llegada", "fecha_salida"] {
        assert_eq!(field_value(&tab, name), "", "{name} kept its value");
    }

    let body = eval(&tab, "JSON.stringify(window.sentInquiries[0].body)");
    let body: serde_json::Value = serde_json::from_str(body.as_str().unwrap()).unwrap();
    assert_eq!(body["service_id"], "service_vnk7sbc");
    assert_eq!(body["template_params"]["telefono"], "No especificado");
    assert_eq!(body["template_params"]["fecha_llegada"], "5/1/2025");
    assert_eq!(body["template_params"]["fecha_salida"], "12/1/2025");
}

#[test]
#[ignore]
fn failed_send_keeps_fields() {
    let tab = load_index();
    stub_fetch(&tab, "fail");
    fill_form(&tab, "ana@example.com", "2025-01-05", "2025-01-12");
    submit(&tab);

    assert!(wait_for(
        &tab,
        "document.querySelector('.form-notice').textContent.length > 0"
    ));
    let retry = eval(&tab, "document.querySelector('form.inquiry-form').dataset.msgRetry");
    assert_eq!(text_of(&tab, ".form-notice"), retry.as_str().unwrap());
    assert_eq!(field_value(&tab, "nombre"), "Ana");
    assert_eq!(field_value(&tab, "email"), "ana@example.com");
    assert_eq!(field_value(&tab, "fecha_salida"), "2025-01-12");

    let disabled = eval(&tab, "document.querySelector('button.submit').disabled");
    assert_eq!(disabled.as_bool(), Some(false));
}
