#![allow(dead_code)]

use innovation_explorer::InnovationRecord;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub fn record(name: &str, kind: &str, scale: &str, country: &str, centres: &str) -> InnovationRecord {
    InnovationRecord {
        innovation: name.to_string(),
        type_of_innovation: kind.to_string(),
        scale: scale.to_string(),
        country: country.to_string(),
        centres_involved: centres.to_string(),
        description: format!("About {name}"),
        ..Default::default()
    }
}

/// Small mixed dataset covering every facet
pub fn sample_records() -> Vec<InnovationRecord> {
    vec![
        record("Biochar", "Technical", "Farm", "Kenya; Tanzania", "CIFOR-ICRAF, IWMI"),
        record("Mobile advisory", "Digital", "National", "Ghana", "IITA"),
        record("Seed systems", "Socio-technical", "Community", "Kenya", "CIAT; IITA"),
        record("Agroforestry plots", "Technical", "Plot", "Ethiopia", "CIFOR-ICRAF"),
        record("Savings groups", "Socio-economic", "Community", "", ""),
    ]
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return String::from_utf8_lossy(&buf).into_owned();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serves a single canned HTTP response; the handle yields the raw request
pub async fn serve_once(status: &str, content_type: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}
