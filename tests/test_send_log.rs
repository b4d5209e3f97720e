use std::fs;

use sendmail_shim::{history, Addr, Addrs, Email, SendLog};

fn email() -> Email {
    let mut email = Email::new();
    email.populate_from_args(&["-falice@localhost"]);
    email
        .populate_from_input(b"To: Bob <bob@localhost>\nBcc: eve@localhost\nX-Mailer: mutt\nSubject: Hi\n\nHello")
        .unwrap();
    email
}

#[test]
fn test_send_log_appends_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let log = SendLog::new(dir.path().join("sent.jsonl"));

    let email = email();
    log.append(&email).unwrap();
    log.append(&email).unwrap();

    let content = fs::read_to_string(log.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(2, lines.len());
    assert!(content.ends_with('\n'));

    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!("alice@localhost", record["from"]["address"]);
    assert_eq!("", record["from"]["name"]);
    assert_eq!("Bob", record["to"][0]["name"]);
    assert_eq!("bob@localhost", record["to"][0]["address"]);
    assert_eq!("eve@localhost", record["bcc"][0]["address"]);
    assert!(record["replyTo"].is_null());
    assert!(record["cc"].is_null());
    assert_eq!("Hi", record["subject"]);
    assert_eq!("X-Mailer: mutt\r\n", record["extraHeaders"]);
    assert_eq!("Hello", record["body"]);
    assert!(record["timestamp"].is_string());

    let parsed: Email = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(email, parsed);
    assert_eq!(
        Some(Addrs::from(vec![Addr::new("Bob", "bob@localhost")])),
        parsed.to
    );
}

#[test]
fn test_send_log_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let log = SendLog::new(dir.path().join("missing").join("sent.jsonl"));

    assert!(matches!(
        log.append(&email()),
        Err(history::Error::OpenLogFileError(_, _))
    ));
}
