//! Startup banner: the access URL and a QR code for phones.

use std::net::IpAddr;

use qrcode::{Color, QrCode};

use crate::config::Config;

/// Quiet zone around the code, in modules.
const QUIET_ZONE: usize = 2;

pub fn base_url(ip: IpAddr, port: u16) -> String {
    match ip {
        IpAddr::V4(v4) => format!("http://{v4}:{port}"),
        IpAddr::V6(v6) => format!("http://[{v6}]:{port}"),
    }
}

/// The link to hand out: the base URL, plus the token when a password is set.
pub fn share_url(base: &str, password: Option<&str>) -> String {
    match password {
        Some(pw) => format!("{base}/?token={}", urlencoding::encode(pw)),
        None => base.to_string(),
    }
}

/// Render `url` as a QR code made of Unicode half blocks.
///
/// Colors are inverted (light modules drawn as blocks) so the code scans on
/// the usual dark terminal background. Two module rows share one text line.
pub fn render_qr(url: &str) -> anyhow::Result<String> {
    let code = QrCode::new(url.as_bytes())?;
    let width = code.width();
    let modules = code.to_colors();
    let full = width + 2 * QUIET_ZONE;

    // Out of range (the quiet zone) counts as light.
    let light = |row: isize, col: isize| -> bool {
        if row < 0 || col < 0 || row as usize >= width || col as usize >= width {
            return true;
        }
        modules[row as usize * width + col as usize] == Color::Light
    };

    let mut out = String::with_capacity((full + 1) * (full / 2 + 1) * 3);
    let start = -(QUIET_ZONE as isize);
    let end = (width + QUIET_ZONE) as isize;
    let mut row = start;
    while row < end {
        for col in start..end {
            let ch = match (light(row, col), light(row + 1, col)) {
                (true, true) => '\u{2588}',
                (true, false) => '\u{2580}',
                (false, true) => '\u{2584}',
                (false, false) => ' ',
            };
            out.push(ch);
        }
        out.push('\n');
        row += 2;
    }
    Ok(out)
}

pub fn print_banner(cfg: &Config, base: &str, share: &str) {
    let rule = "=".repeat(60);
    match &cfg.password {
        Some(pw) => println!("Password protection enabled, password: {pw}"),
        None => println!("No password set: every device on the network can access this server"),
    }
    println!();
    println!("{rule}");
    println!(" QuickShare is running");
    println!("{rule}");
    println!(" Serving:    {}", cfg.root.display());
    println!(" Address:    {base}");
    if let Some(pw) = &cfg.password {
        println!(" Password:   {pw}");
        println!(" Full link:  {share}");
    }
    println!("{rule}");
    println!();

    if cfg.show_qr {
        match render_qr(share) {
            Ok(qr) => {
                println!("Scan to connect:");
                println!("{qr}");
            }
            Err(e) => {
                tracing::warn!("could not render QR code: {e}");
                println!("\nAccess URL: {share}\n");
            }
        }
    }

    println!("Press Ctrl+C to stop the server\n");
}
