//! Builders for synthetic shop access-log lines.

pub const DEFAULT_HOST: &str = "all_to_the_bottom.com";
pub const DEFAULT_TIMESTAMP: &str = "2018-08-01 00:00:00";

#[derive(Debug, Clone)]
pub struct LineBuilder {
    service: String,
    timestamp: String,
    request_id: String,
    level: String,
    client: String,
    host: String,
    path: String,
}

impl LineBuilder {
    pub fn new(client: &str) -> Self {
        Self {
            service: "shop_api".to_string(),
            timestamp: DEFAULT_TIMESTAMP.to_string(),
            request_id: "YQ4WUDJV".to_string(),
            level: "INFO".to_string(),
            client: client.to_string(),
            host: DEFAULT_HOST.to_string(),
            path: String::new(),
        }
    }

    pub fn at(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub fn request_id(mut self, id: &str) -> Self {
        self.request_id = id.to_string();
        self
    }

    pub fn level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Path after the host, without the leading slash.
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn view(self, category: &str, item: Option<&str>) -> Self {
        match item {
            Some(item) => self.path(&format!("{category}/{item}/")),
            None => self.path(&format!("{category}/")),
        }
    }

    pub fn add_to_cart(self, goods: u32, amount: u32, cart: u32) -> Self {
        self.path(&format!("cart?goods_id={goods}&amount={amount}&cart_id={cart}"))
    }

    pub fn pay(self, user: u64, cart: u32) -> Self {
        self.path(&format!("pay?user_id={user}&cart_id={cart}"))
    }

    pub fn paid(self, cart: u32) -> Self {
        self.path(&format!("success_pay_{cart}/"))
    }

    pub fn build(&self) -> String {
        format!(
            "{:<14}| {} [{}] {}: {} https://{}/{}",
            self.service,
            self.timestamp,
            self.request_id,
            self.level,
            self.client,
            self.host,
            self.path
        )
    }
}

/// Accumulates lines into newline-terminated log text.
#[derive(Debug, Default, Clone)]
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, line: LineBuilder) -> Self {
        self.lines.push(line.build());
        self
    }

    pub fn raw(mut self, raw: &str) -> Self {
        self.lines.push(raw.to_string());
        self
    }

    pub fn build(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }
}
