//! Syslog sink for remote log collection
//!
//! Sends logstash-formatted JSON events to a syslog-compatible collector
//! over UDP or TCP. One sink instance exists per severity threshold so that
//! channel configuration can pick its minimum remote severity by name
//! (`syslog-debug` .. `syslog-error`).

use crate::core::{
    Handler, LogRecord, RecordFormat, Result, RouterError, Severity, SyslogConfig, SyslogProtocol,
};
use parking_lot::Mutex;
use std::io::Write;
use std::net::{TcpStream, UdpSocket};
use std::time::Duration;

/// RFC 3164 facility for application messages (LOG_USER)
const FACILITY_USER: u8 = 1;

const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

enum Transport {
    Udp(UdpSocket),
    /// Connected lazily so that an unreachable collector is a runtime sink
    /// error (swallowed by the failure group), not a build failure.
    Tcp(Option<TcpStream>),
}

pub struct SyslogHandler {
    transport: Mutex<Transport>,
    endpoint: String,
    threshold: Severity,
    tag: String,
    format: RecordFormat,
    name: String,
}

impl SyslogHandler {
    pub fn new(config: &SyslogConfig, threshold: Severity) -> Result<Self> {
        let transport = match config.protocol {
            SyslogProtocol::Udp => {
                let socket = UdpSocket::bind("0.0.0.0:0")?;
                socket.set_write_timeout(Some(WRITE_TIMEOUT))?;
                Transport::Udp(socket)
            }
            SyslogProtocol::Tcp => Transport::Tcp(None),
        };

        Ok(Self {
            transport: Mutex::new(transport),
            endpoint: config.endpoint(),
            threshold,
            tag: config.tag.clone(),
            format: RecordFormat::Logstash {
                tag: config.tag.clone(),
                hostname: config.hostname.clone(),
            },
            name: format!("syslog-{}", threshold.to_str()),
        })
    }

    fn connect_tcp(endpoint: &str) -> Result<TcpStream> {
        let stream = TcpStream::connect(endpoint)?;
        stream.set_write_timeout(Some(WRITE_TIMEOUT))?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    /// Build the syslog datagram: `<PRI>TAG: payload`
    fn encode(&self, record: &LogRecord) -> Result<String> {
        let priority = FACILITY_USER * 8 + record.severity.syslog_code();
        let payload = self.format.format(record)?;
        Ok(format!("<{}>{}: {}", priority, self.tag, payload))
    }
}

impl Handler for SyslogHandler {
    fn handle(&self, record: &LogRecord) -> Result<()> {
        if record.severity < self.threshold {
            return Ok(());
        }

        let message = self.encode(record)?;

        let mut transport = self.transport.lock();
        match &mut *transport {
            Transport::Udp(socket) => {
                socket.send_to(message.as_bytes(), &self.endpoint)?;
                Ok(())
            }
            Transport::Tcp(stream_slot) => {
                if stream_slot.is_none() {
                    *stream_slot = Some(Self::connect_tcp(&self.endpoint)?);
                }
                let stream = stream_slot
                    .as_mut()
                    .ok_or_else(|| RouterError::writer("Syslog stream not connected"))?;

                let mut framed = message.into_bytes();
                framed.push(b'\n');
                if let Err(e) = stream.write_all(&framed) {
                    // Drop the broken connection; the next record reconnects.
                    *stream_slot = None;
                    return Err(e.into());
                }
                Ok(())
            }
        }
    }

    fn flush(&self) -> Result<()> {
        let mut transport = self.transport.lock();
        if let Transport::Tcp(Some(stream)) = &mut *transport {
            stream.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
