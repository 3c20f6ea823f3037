use dot_lookup_infrastructure::dns::codec::{decode_name, encode_name};

#[test]
fn test_encode_decode_roundtrip() {
    let names = [
        "example.com",
        "www.example.com",
        "a.b.c.d.e.f.g",
        "xn--bcher-kva.example",
        "_dns.resolver.arpa",
        "localhost",
        "1.0.0.127.in-addr.arpa",
    ];

    for name in names {
        let wire = encode_name(name);
        let (decoded, consumed) = decode_name(&wire, 0).unwrap();
        assert_eq!(decoded, name, "roundtrip failed for {}", name);
        assert_eq!(consumed, wire.len(), "consumed mismatch for {}", name);
    }
}

#[test]
fn test_roundtrip_max_label() {
    let label = "z".repeat(63);
    let name = format!("{}.example", label);
    let (decoded, _) = decode_name(&encode_name(&name), 0).unwrap();
    assert_eq!(decoded, name);
}

#[test]
fn test_encoded_length() {
    // one length byte per label plus the root byte
    assert_eq!(encode_name("example.com").len(), 13);
    assert_eq!(encode_name("a").len(), 3);
}

#[test]
fn test_every_truncation_is_an_error() {
    let wire = encode_name("mail.example.org");
    for cut in 0..wire.len() {
        assert!(
            decode_name(&wire[..cut], 0).is_err(),
            "truncation at {} should fail",
            cut
        );
    }
}

#[test]
fn test_cname_self_reference_resolves() {
    // header, question "example.com", then RDATA "www" + pointer to the question
    let mut msg = vec![0u8; 12];
    msg.extend_from_slice(&encode_name("example.com"));
    msg.extend_from_slice(&[0x00, 0x05, 0x00, 0x01]);
    let rdata_at = msg.len();
    msg.extend_from_slice(b"\x03www\xC0\x0C");

    let (name, consumed) = decode_name(&msg, rdata_at).unwrap();
    assert_eq!(name, "www.example.com");
    assert_eq!(consumed, 6);
}
