use serde_json::Value;
use tracing::Instrument;

use super::{BoxedToolFuture, Error, Tool};

pub(crate) trait ToolObject: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameter_schema(&self) -> &Value;

    fn execute(&self, arguments: Value) -> BoxedToolFuture;
}

pub(crate) struct ToolObjectImpl<T: Tool>(pub T);

impl<T: Tool> ToolObject for ToolObjectImpl<T> {
    #[inline]
    fn name(&self) -> &str {
        self.0.name()
    }

    #[inline]
    fn description(&self) -> &str {
        self.0.description()
    }

    #[inline]
    fn parameter_schema(&self) -> &Value {
        self.0.parameter_schema()
    }

    fn execute(&self, arguments: Value) -> BoxedToolFuture {
        // Chat-completions models send arguments as an encoded JSON string,
        // and tools without parameters are often called with `null` or an
        // empty payload.
        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            Value::String(s) if s.trim().is_empty() => {
                Value::Object(Default::default())
            }
            Value::String(s) => {
                serde_json::from_str(&s).unwrap_or(Value::String(s))
            }
            other => other,
        };

        let input: T::Input = match serde_json::from_value(arguments) {
            Ok(input) => input,
            Err(err) => {
                return Box::pin(std::future::ready(Err(Error::from(err))));
            }
        };

        let span = debug_span!("tool execute", tool = self.0.name());
        let fut = self.0.execute(input);
        Box::pin(
            async move {
                let result = fut.await;
                if let Err(err) = &result {
                    debug!("tool failed: {err}");
                }
                result
            }
            .instrument(span),
        )
    }
}
