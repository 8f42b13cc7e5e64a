//! OpenAPI fragment describing the books endpoints.

use serde_json::{json, Value};

fn text_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "text/plain": {
                "schema": { "$ref": "#/components/schemas/ErrorMessage" }
            }
        }
    })
}

fn id_parameter(name: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn form_body(required: &[&str]) -> Value {
    json!({
        "required": true,
        "content": {
            "multipart/form-data": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "book_name": { "type": "string" },
                        "book_description": { "type": "string" },
                        "genre": { "type": "string" },
                        "book_image": { "type": "string", "format": "binary" }
                    },
                    "required": required
                }
            }
        }
    })
}

pub fn fragment() -> Value {
    json!({
        "paths": {
            "/books": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "Every stored book",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            }
                        },
                        "500": text_response("Store unavailable")
                    }
                }
            },
            "/books/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter("id")],
                    "responses": {
                        "200": {
                            "description": "The book",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Book" }
                                }
                            }
                        },
                        "404": text_response("No book with that ID"),
                        "500": text_response("Store unavailable")
                    }
                }
            },
            "/createBookWithImage": {
                "post": {
                    "summary": "Create a book with a cover image",
                    "tags": ["Books"],
                    "requestBody": form_body(&["book_name", "book_description", "genre", "book_image"]),
                    "responses": {
                        "201": {
                            "description": "The stored book",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Book" }
                                }
                            }
                        },
                        "400": text_response("A required field is missing"),
                        "500": text_response("Store unavailable")
                    }
                }
            },
            "/updateBookById/{book_id}": {
                "put": {
                    "summary": "Update some fields of a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter("book_id")],
                    "requestBody": form_body(&[]),
                    "responses": {
                        "200": {
                            "description": "Update applied",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UpdateConfirmation" }
                                }
                            }
                        },
                        "400": text_response("No fields supplied"),
                        "404": text_response("No book with that ID"),
                        "500": text_response("Store unavailable")
                    }
                }
            },
            "/deleteBookById/{id}": {
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter("id")],
                    "responses": {
                        "200": text_response("Book deleted"),
                        "404": text_response("No book with that ID"),
                        "500": text_response("Store unavailable")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "book_id": { "type": "integer", "format": "int64" },
                        "book_name": { "type": "string" },
                        "book_description": { "type": "string" },
                        "genre": { "type": "string" },
                        "book_image": {
                            "type": "string",
                            "description": "Public path of the cover image"
                        }
                    },
                    "required": ["book_id", "book_name", "book_description", "genre", "book_image"]
                },
                "UpdateConfirmation": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" }
                    },
                    "required": ["message"]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_covers_every_route() {
        let spec = fragment();
        for path in [
            "/books",
            "/books/{id}",
            "/createBookWithImage",
            "/updateBookById/{book_id}",
            "/deleteBookById/{id}",
        ] {
            assert!(spec["paths"][path].is_object(), "missing {}", path);
        }
    }
}
