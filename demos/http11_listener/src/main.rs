//! TCP で受信した HTTP/1.1 リクエストを表示する例 (tokio)
//!
//! 使い方:
//!   # ポート 42069 で待ち受け
//!   cargo run -p http11_listener
//!
//!   # 別の端末から
//!   curl -X POST http://localhost:42069/coffee -H 'Content-Type: application/json' -d '{"flavor":"dark mode"}'

use std::net::SocketAddr;
use std::time::Duration;

use log::{LevelFilter, Log, Metadata, Record};
use tokio_http11::{Listener, Request};

struct ListenerOptions {
    port: u16,
    read_timeout: Option<Duration>,
    verbose: bool,
}

/// ログを標準エラー出力に書くロガー
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record));
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{} {}] {}", record.level(), record.target(), record.args())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    log::set_logger(&LOGGER).map_err(|e| format!("{:?}", e))?;
    log::set_max_level(if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });

    let addr = format!("0.0.0.0:{}", options.port);
    let listener = Listener::bind(&addr)
        .await?
        .read_timeout(options.read_timeout);

    println!("Listening on tcp://{}", addr);

    listener.serve(print_request).await?;
    Ok(())
}

async fn print_request(request: Request, peer_addr: SocketAddr) {
    println!("{}", format_request(&request, peer_addr));
}

fn format_request(request: &Request, peer_addr: SocketAddr) -> String {
    let mut out = format!("Request from {}\n", peer_addr);
    out.push_str("Request line:\n");
    out.push_str(&format!("- Method: {}\n", request.request_line.method));
    out.push_str(&format!("- Target: {}\n", request.target()));
    out.push_str(&format!("- Version: {}\n", request.request_line.version));
    out.push_str("Headers:\n");
    for (name, value) in request.headers.entries() {
        out.push_str(&format!("- {}: {}\n", name, String::from_utf8_lossy(value)));
    }
    out.push_str("Body:\n");
    out.push_str(&String::from_utf8_lossy(&request.body));
    out
}

fn parse_args() -> Result<ListenerOptions, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "http11_listener";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --port オプション
    let port: u16 = noargs::opt("port")
        .short('p')
        .doc("Port to listen on")
        .default("42069")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --read-timeout オプション (秒、0 で無期限)
    let read_timeout_secs: u64 = noargs::opt("read-timeout")
        .doc("Read timeout in seconds (0 disables the timeout)")
        .default("60")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;
    let read_timeout = (read_timeout_secs > 0).then(|| Duration::from_secs(read_timeout_secs));

    // --verbose フラグ (接続ごとのデバッグログを表示)
    let verbose: bool = noargs::flag("verbose")
        .short('v')
        .doc("Show connection and decode logs")
        .take(&mut args)
        .is_present();

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(ListenerOptions {
        port,
        read_timeout,
        verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_http11::{ReadOptions, read_request};

    #[tokio::test]
    async fn test_format_request() {
        let data: &[u8] =
            b"POST /coffee HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 5\r\n\r\nhello";
        let request = read_request(data, &ReadOptions::default()).await.unwrap();
        let peer_addr: SocketAddr = "127.0.0.1:50000".parse().unwrap();

        assert_eq!(
            format_request(&request, peer_addr),
            "Request from 127.0.0.1:50000\n\
             Request line:\n\
             - Method: POST\n\
             - Target: /coffee\n\
             - Version: 1.1\n\
             Headers:\n\
             - host: localhost:42069\n\
             - content-length: 5\n\
             Body:\n\
             hello"
        );
    }

    #[tokio::test]
    async fn test_format_request_with_obs_text() {
        let data: &[u8] = b"GET /caf\xe9 HTTP/1.1\r\nX-Name: caf\xe9\r\n\r\n";
        let request = read_request(data, &ReadOptions::default()).await.unwrap();
        let peer_addr: SocketAddr = "127.0.0.1:50000".parse().unwrap();

        let out = format_request(&request, peer_addr);
        assert!(out.contains("- Target: /caf\u{fffd}\n"));
        assert!(out.contains("- x-name: caf\u{fffd}\n"));
    }

    #[test]
    fn test_format_record() {
        let out = format_record(
            &Record::builder()
                .level(log::Level::Warn)
                .target("tokio_http11::reader")
                .args(format_args!("3 trailing bytes after request were ignored"))
                .build(),
        );
        assert_eq!(
            out,
            "[WARN tokio_http11::reader] 3 trailing bytes after request were ignored"
        );
    }
}
