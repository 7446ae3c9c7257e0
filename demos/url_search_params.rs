/// `UrlSearchParams` usage example
use urlstate::{Url, UrlSearchParams};

fn main() {
    let mut params = UrlSearchParams::parse("?name=John+Doe&age=30&city=Tokyo&age=31");

    println!("name: {:?}", params.get("name")); // Some("John Doe")
    println!("all ages: {:?}", params.get_all("age")); // ["30", "31"]
    println!();

    params.append("country", "日本");
    println!("After append: {params}"); // name=John+Doe&age=30&city=Tokyo&age=31&country=%E6%97%A5%E6%9C%AC

    // Replaces the first pair and drops the rest
    params.set("age", "32");
    println!("After set: {params}"); // name=John+Doe&age=32&city=Tokyo&country=%E6%97%A5%E6%9C%AC

    params.delete("city", None);
    println!("After delete: {params}"); // name=John+Doe&age=32&country=%E6%97%A5%E6%9C%AC

    params.sort();
    println!("After sort: {}", params.serialize()); // ?age=32&country=%E6%97%A5%E6%9C%AC&name=John+Doe
    println!();

    for (key, value) in params.iter() {
        println!("  {key} = {value}");
    }
    println!();

    // Write the parameters back into a URL
    let mut url = Url::parse("https://example.com/search?old=1", None).expect("Failed to parse URL");
    url.set_search_params(&params);
    println!("URL: {}", url.href()); // https://example.com/search?age=32&country=%E6%97%A5%E6%9C%AC&name=John+Doe
}
