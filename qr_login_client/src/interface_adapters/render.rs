use qrcode::QrCode;
use qrcode::render::unicode;
use qrcode::types::QrError;

// Renders the session id as a QR code made of half-block characters so it
// can be scanned straight from a terminal.
pub fn render_session_qr(session_id: &str) -> Result<String, QrError> {
    let code = QrCode::new(session_id.as_bytes())?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}
