//! Account Commands

/// 注册命令
#[derive(Debug, Clone)]
pub struct Register {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// 登录命令
#[derive(Debug, Clone)]
pub struct Login {
    pub email: String,
    pub password: String,
}
