/// 引擎配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ENVIRONMENT | development | 运行环境 |
/// | EVENT_CHANNEL_CAPACITY | 4096 | 履约事件广播通道容量 |
/// | PRINT_CHANNEL_CAPACITY | 1024 | 打印任务广播通道容量 |
/// | DEFAULT_PREP_MINUTES | 15 | 区域未配置制作时长时的估算值(分钟) |
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 履约事件广播通道容量
    pub event_channel_capacity: usize,
    /// 打印任务广播通道容量
    pub print_channel_capacity: usize,
    /// 工单默认估算制作时长（分钟）
    pub default_prep_minutes: i32,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            event_channel_capacity: std::env::var("EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4096),
            print_channel_capacity: std::env::var("PRINT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1024),
            default_prep_minutes: std::env::var("DEFAULT_PREP_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(15),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            event_channel_capacity: 4096,
            print_channel_capacity: 1024,
            default_prep_minutes: 15,
        }
    }
}
