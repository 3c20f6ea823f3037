//! `host`-style answer lines.

use dot_lookup_domain::AnswerSet;

/// Addresses first, then IPv6 addresses, then aliases, each group in the
/// order the server returned them.
pub fn answer_lines(domain: &str, answers: &AnswerSet) -> Vec<String> {
    let ipv4 = answers
        .ipv4
        .iter()
        .map(|ip| format!("{domain} has address {ip}"));
    let ipv6 = answers
        .ipv6
        .iter()
        .map(|ip| format!("{domain} has IPv6 address {ip}"));
    let cname = answers
        .cname
        .iter()
        .map(|target| format!("{domain} is an alias for {target}."));

    ipv4.chain(ipv6).chain(cname).collect()
}

pub fn print_answers(domain: &str, answers: &AnswerSet) {
    for line in answer_lines(domain, answers) {
        println!("{line}");
    }
}
