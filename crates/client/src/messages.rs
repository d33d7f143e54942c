//! User-facing message catalog.
//!
//! Every notification and page title shown to the shopper goes through
//! [`Message`] so hosts can switch [`Locale`] without touching call sites.
//! Backend-provided details are shown verbatim and never pass through here.

use std::fmt;
use std::str::FromStr;

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    ZhCn,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => f.write_str("en"),
            Self::ZhCn => f.write_str("zh-cn"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "zh" | "zh-cn" | "zh-hans" => Ok(Self::ZhCn),
            _ => Err(format!("unsupported locale: {s}")),
        }
    }
}

/// Catalog keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    // HTTP classification
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    RequestFailed,
    NetworkError,
    RequestSetupError,

    // Auth store
    RegisterSuccess,
    RegisterFailed,
    EmailTaken,
    PhoneTaken,
    UsernameTaken,
    LoginSuccess,
    LoginFailed,
    InvalidCredentials,
    InactiveAccount,
    EmailUnverified,
    LogoutSuccess,
    SessionExpired,
    EmailVerified,
    PasswordChanged,

    // Cart store
    CartAdded,
    CartAddFailed,
    CartUpdated,
    CartUpdateFailed,
    CartRemoved,
    CartRemoveFailed,

    // Route titles
    AppName,
    TitleLogin,
    TitleRegister,
    TitleHome,
    TitleProducts,
    TitleProductDetail,
    TitleCart,
    TitleOrders,
    TitleProfile,
    TitleNotFound,
}

impl Message {
    /// Render this message in the given locale.
    #[must_use]
    pub const fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en(),
            Locale::ZhCn => self.zh_cn(),
        }
    }

    const fn en(self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized, please log in again",
            Self::Forbidden => "You do not have permission to access this resource",
            Self::NotFound => "The requested resource does not exist",
            Self::ServerError => "Server error",
            Self::RequestFailed => "Request failed",
            Self::NetworkError => "Network error, please check your connection",
            Self::RequestSetupError => "Request configuration error",
            Self::RegisterSuccess => {
                "Registration successful! Please check your inbox for the verification email"
            }
            Self::RegisterFailed => "Registration failed, please try again later",
            Self::EmailTaken => "This email is already registered",
            Self::PhoneTaken => "This phone number is already registered",
            Self::UsernameTaken => "This username is already taken",
            Self::LoginSuccess => "Logged in, welcome back",
            Self::LoginFailed => "Login failed, please check your credentials",
            Self::InvalidCredentials => "Incorrect email or password",
            Self::InactiveAccount => "This account has been disabled, please contact support",
            Self::EmailUnverified => "Please verify your email before logging in",
            Self::LogoutSuccess => "Logged out",
            Self::SessionExpired => "Your session has expired, please log in again",
            Self::EmailVerified => "Email verified",
            Self::PasswordChanged => "Password changed",
            Self::CartAdded => "Added to cart",
            Self::CartAddFailed => "Could not add to cart",
            Self::CartUpdated => "Cart updated",
            Self::CartUpdateFailed => "Could not update cart",
            Self::CartRemoved => "Removed from cart",
            Self::CartRemoveFailed => "Could not remove from cart",
            Self::AppName => "E-Commerce",
            Self::TitleLogin => "Log in",
            Self::TitleRegister => "Register",
            Self::TitleHome => "Home",
            Self::TitleProducts => "Products",
            Self::TitleProductDetail => "Product details",
            Self::TitleCart => "Cart",
            Self::TitleOrders => "My orders",
            Self::TitleProfile => "Profile",
            Self::TitleNotFound => "Page not found",
        }
    }

    const fn zh_cn(self) -> &'static str {
        match self {
            Self::Unauthorized => "未授权，请重新登录",
            Self::Forbidden => "没有权限访问此资源",
            Self::NotFound => "请求的资源不存在",
            Self::ServerError => "服务器错误",
            Self::RequestFailed => "请求失败",
            Self::NetworkError => "网络错误，请检查您的网络连接",
            Self::RequestSetupError => "请求配置错误",
            Self::RegisterSuccess => "注册成功！请查收邮箱验证邮件",
            Self::RegisterFailed => "注册失败，请稍后重试",
            Self::EmailTaken => "该邮箱已被注册",
            Self::PhoneTaken => "该手机号已被注册",
            Self::UsernameTaken => "该用户名已被注册",
            Self::LoginSuccess => "登录成功！欢迎回来",
            Self::LoginFailed => "登录失败，请检查账号密码",
            Self::InvalidCredentials => "邮箱或密码错误",
            Self::InactiveAccount => "账户已被禁用，请联系管理员",
            Self::EmailUnverified => "请先验证邮箱后再登录",
            Self::LogoutSuccess => "已退出登录",
            Self::SessionExpired => "登录已过期，请重新登录",
            Self::EmailVerified => "邮箱验证成功",
            Self::PasswordChanged => "密码修改成功",
            Self::CartAdded => "已添加到购物车",
            Self::CartAddFailed => "添加失败",
            Self::CartUpdated => "已更新",
            Self::CartUpdateFailed => "更新失败",
            Self::CartRemoved => "已移除",
            Self::CartRemoveFailed => "移除失败",
            Self::AppName => "E-Commerce",
            Self::TitleLogin => "登录",
            Self::TitleRegister => "注册",
            Self::TitleHome => "首页",
            Self::TitleProducts => "商品列表",
            Self::TitleProductDetail => "商品详情",
            Self::TitleCart => "购物车",
            Self::TitleOrders => "我的订单",
            Self::TitleProfile => "个人中心",
            Self::TitleNotFound => "页面不存在",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("zh_CN".parse::<Locale>().unwrap(), Locale::ZhCn);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_text_per_locale() {
        assert_eq!(Message::ServerError.text(Locale::En), "Server error");
        assert_eq!(Message::ServerError.text(Locale::ZhCn), "服务器错误");
        assert_eq!(Message::AppName.text(Locale::ZhCn), "E-Commerce");
    }
}
