//! 命令行参数解析与命令执行

use serde_json::{json, Value};

use crate::error::Result;
use crate::services::PermissionEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Version,
    Help,
    Validate(Vec<String>),
    Diff { current: Vec<String>, target: Vec<String> },
    Suggest { role: String, current: Vec<String> },
    Search(String),
    Category(String),
    Role(String),
    CanGrant { permission: String, current: Vec<String> },
    Closure(String),
}

/// 命令输出：JSON 结果与进程退出码
#[derive(Debug)]
pub struct CommandOutput {
    pub value: Value,
    pub exit_code: i32,
}

impl CommandOutput {
    fn ok(value: Value) -> Self {
        Self { value, exit_code: 0 }
    }
}

/// 逗号分隔列表，忽略空项
fn split_list(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse(args: &[String]) -> std::result::Result<Command, String> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };

        let command = match name.as_str() {
            "--version" | "-V" => Command::Version,
            "--help" | "-h" | "help" => Command::Help,
            "validate" => Command::Validate(rest.to_vec()),
            "diff" => match rest {
                [current, target] => Command::Diff {
                    current: split_list(current),
                    target: split_list(target),
                },
                _ => return Err("diff expects <current-csv> <target-csv>".to_string()),
            },
            "suggest" => match rest.split_first() {
                Some((role, current)) => Command::Suggest {
                    role: role.clone(),
                    current: current.to_vec(),
                },
                None => return Err("suggest expects <ROLE> [permission...]".to_string()),
            },
            "search" => Command::Search(rest.join(" ")),
            "category" => match rest {
                [category] => Command::Category(category.clone()),
                _ => return Err("category expects <CATEGORY>".to_string()),
            },
            "role" => match rest {
                [role] => Command::Role(role.clone()),
                _ => return Err("role expects <ROLE>".to_string()),
            },
            "can-grant" => match rest.split_first() {
                Some((permission, current)) => Command::CanGrant {
                    permission: permission.clone(),
                    current: current.to_vec(),
                },
                None => return Err("can-grant expects <permission> [held...]".to_string()),
            },
            "closure" => match rest {
                [permission] => Command::Closure(permission.clone()),
                _ => return Err("closure expects <permission>".to_string()),
            },
            other => return Err(format!("未知参数: {}", other)),
        };

        Ok(command)
    }

    pub fn execute(&self, engine: &PermissionEngine) -> Result<CommandOutput> {
        let output = match self {
            Command::Version => CommandOutput::ok(json!({ "version": env!("CARGO_PKG_VERSION") })),
            Command::Help => CommandOutput::ok(Value::String(help_text())),
            Command::Validate(permissions) => {
                let result = engine.validate(permissions);
                let exit_code = if result.is_valid { 0 } else { 1 };
                CommandOutput {
                    value: serde_json::to_value(&result)?,
                    exit_code,
                }
            }
            Command::Diff { current, target } => {
                CommandOutput::ok(serde_json::to_value(engine.calculate_diff(current, target))?)
            }
            Command::Suggest { role, current } => {
                CommandOutput::ok(serde_json::to_value(engine.get_suggestions(role, current))?)
            }
            Command::Search(query) => {
                CommandOutput::ok(serde_json::to_value(engine.search_permissions(query))?)
            }
            Command::Category(category) => CommandOutput::ok(serde_json::to_value(
                engine.permissions_by_category_name(category),
            )?),
            Command::Role(role) => {
                CommandOutput::ok(serde_json::to_value(engine.common_permissions_for_role(role))?)
            }
            Command::CanGrant { permission, current } => CommandOutput::ok(json!({
                "permission": permission,
                "canGrant": engine.can_grant_permission(permission, current),
            })),
            Command::Closure(permission) => {
                CommandOutput::ok(serde_json::to_value(engine.dependency_closure(permission))?)
            }
        };

        Ok(output)
    }
}

pub fn help_text() -> String {
    [
        format!("permission-engine {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "用法: permission-engine <命令> [参数]".to_string(),
        String::new(),
        "命令:".to_string(),
        "  validate <perm>...               校验权限集合（无效时退出码为 1）".to_string(),
        "  diff <current-csv> <target-csv>  计算权限差异".to_string(),
        "  suggest <ROLE> [perm...]         基于角色基线给出建议".to_string(),
        "  search [query]                   搜索权限".to_string(),
        "  category <CATEGORY>              按分类列出权限".to_string(),
        "  role <ROLE>                      列出角色基线权限".to_string(),
        "  can-grant <perm> [held...]       检查依赖是否满足".to_string(),
        "  closure <perm>                   列出传递依赖".to_string(),
        String::new(),
        "选项:".to_string(),
        "  --version     打印版本信息并退出".to_string(),
        "  --help        打印此帮助信息并退出".to_string(),
        String::new(),
        "环境变量:".to_string(),
        "  PERM_LOGGING__LEVEL, PERM_LOGGING__FORMAT, PERM_CATALOG__PATH,".to_string(),
        "  PERM_SUGGESTIONS__INCLUDE_REMOVALS, PERM_SUGGESTIONS__MIN_CONFIDENCE".to_string(),
    ]
    .join("\n")
}
