use urlstate::{Host, Url, UrlRecord};

fn main() {
    let url = Url::parse("HTTPS://User@Example.COM:443/a/./b/../c d?q=1#top", None)
        .expect("Failed to parse URL");

    println!("URL: {}", url.href()); // https://User@example.com/a/c%20d?q=1#top
    println!("Protocol: {}", url.protocol()); // https:
    println!("Username: {}", url.username()); // User
    println!("Host: {}", url.host()); // example.com
    println!("Port: {:?}", url.port()); // ""
    println!("Pathname: {}", url.pathname()); // /a/c%20d
    println!("Search: {}", url.search()); // ?q=1
    println!("Hash: {}", url.hash()); // #top
    println!("Origin: {}", url.origin()); // https://example.com
    println!();

    // Relative references resolve against a base
    let relative = Url::parse("../up?x", Some("http://h/dir/sub/page")).expect("relative");
    println!("Resolved: {}", relative.href()); // http://h/dir/up?x
    println!();

    // The record keeps typed components
    let record = UrlRecord::parse("http://0x7f.1:8080/", None).expect("record");
    if let Host::Ipv4(address) = record.host() {
        println!("IPv4 host as number: {address:#010x}"); // 0x7f000001
    }
    println!("Port: {:?}", record.port()); // Some(8080)
}
